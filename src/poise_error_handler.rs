use poise::{CreateReply, FrameworkError};
use tracing::{error, warn};

use crate::{commands::CommandError, BotState};

type Context<'a> = poise::Context<'a, BotState, CommandError>;

const ASK_AN_ADMIN: &str = "Consultez `/aide` ou demandez à un responsable du club.";

pub async fn handle_error(error: FrameworkError<'_, BotState, CommandError>) {
    use FrameworkError::*;

    match error {
        Setup { error, .. } => {
            error!("Bot setup failed: {error}");
        }

        Command { error, ctx, .. } => handle_command_error(ctx, error).await,

        ArgumentParse {
            error, input, ctx, ..
        } => {
            let hint = ctx.command().help_text.as_deref().unwrap_or(ASK_AN_ADMIN);
            let response = match input {
                Some(input) => format!("**Je ne comprends pas `{input}` : {error}**\n{hint}"),
                None => format!("**{error}**\n{hint}"),
            };

            reply(ctx, &response).await;
        }

        // Registered commands out of sync with this build.
        CommandStructureMismatch {
            description, ctx, ..
        } => {
            error!(
                "Arguments of `/{}` do not match the registered command: {description}",
                ctx.command.qualified_name
            );
            reply(
                poise::Context::Application(ctx),
                "Cette commande vient de changer. Réessayez dans quelques minutes.",
            )
            .await;
        }

        MissingUserPermissions { ctx, .. } => {
            warn!(
                "{} tried `/{}` without the permission",
                ctx.author().name,
                ctx.command().qualified_name
            );
            reply(ctx, "Cette commande est réservée aux responsables du club.").await;
        }

        MissingBotPermissions {
            missing_permissions,
            ctx,
            ..
        } => {
            error!(
                "Missing bot permissions for `/{}`: {missing_permissions}",
                ctx.command().qualified_name
            );
            reply(ctx, "Le bot n'a pas les droits nécessaires dans ce salon.").await;
        }

        GuildOnly { ctx, .. } => {
            reply(ctx, "Cette commande s'utilise sur le serveur du club.").await;
        }

        other => {
            warn!("Unhandled framework error: {other}");
        }
    }
}

async fn handle_command_error(ctx: Context<'_>, error: CommandError) {
    let command = &ctx.command().qualified_name;

    match error {
        CommandError::User { message } | CommandError::InvalidArgument { message } => {
            reply(ctx, &message).await;
        }

        CommandError::Internal { message } => {
            error!("`/{command}` failed for {}: {message}", ctx.author().name);
            reply(ctx, &internal_message(&message)).await;
        }

        CommandError::Serenity(err) => {
            error!("Discord error in `/{command}`: {err}");
            reply(ctx, &internal_message("Discord n'a pas répondu.")).await;
        }
    }
}

fn internal_message(detail: &str) -> String {
    format!(
        "Oups, un problème est survenu : {detail}\n\
         Réessayez dans un instant ou prévenez un responsable."
    )
}

async fn reply(ctx: Context<'_>, message: &str) {
    let sent = ctx
        .send(CreateReply::default().content(message).ephemeral(true))
        .await;

    if let Err(err) = sent {
        error!("Could not send an error reply: {err}\nThe message was: {message}");
    }
}
