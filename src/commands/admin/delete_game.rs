use std::time::Duration;

use poise::{
    serenity_prelude::{
        ButtonStyle, CreateActionRow, CreateButton, CreateInteractionResponse,
    },
    CreateReply,
};

use crate::{
    commands::{
        arguments::GameRef, autocomplete_game, find_game, internal_err, ApplicationContext,
        CommandResult,
    },
    utils::formatting::game_title,
};

const CONFIRM_TIMEOUT: Duration = Duration::from_secs(120);

/// Supprimer un match, avec ses bénévoles et son covoiturage.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "match-supprimer")]
pub async fn delete_game(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match, par exemple `#12`."]
    #[autocomplete = "autocomplete_game"]
    game: GameRef,
) -> CommandResult {
    let game = find_game(&ctx, game.into()).await?;
    let volunteers: usize = game.roles.iter().map(|role| role.volunteers.len()).sum();

    let reply = ctx
        .send(
            CreateReply::default()
                .content(format!(
                    "# Supprimer le match `#{}` ?\n\
                     {} · {} à {}\n\
                     {volunteers} bénévole(s) et {} entrée(s) de covoiturage seront perdus.\n\
                     **Sans confirmation dans {} secondes, la suppression est annulée.**",
                    game.id,
                    game_title(&game.fixture),
                    game.fixture.date_label,
                    game.fixture.time_label,
                    game.carpool.len(),
                    CONFIRM_TIMEOUT.as_secs(),
                ))
                .components(vec![CreateActionRow::Buttons(vec![
                    CreateButton::new("cancel")
                        .label("Annuler")
                        .style(ButtonStyle::Secondary),
                    CreateButton::new("confirm")
                        .label("Supprimer")
                        .style(ButtonStyle::Danger),
                ])])
                .ephemeral(true),
        )
        .await?;

    let interaction = reply
        .message()
        .await?
        .await_component_interaction(ctx.serenity_context())
        .author_id(ctx.author().id)
        .timeout(CONFIRM_TIMEOUT)
        .await;

    let Some(interaction) = interaction else {
        reply
            .edit(
                ctx.into(),
                CreateReply::default()
                    .content("Suppression annulée (pas de confirmation).")
                    .components(vec![]),
            )
            .await?;
        return Ok(());
    };

    interaction
        .create_response(ctx.serenity_context(), CreateInteractionResponse::Acknowledge)
        .await?;

    let content = match interaction.data.custom_id.as_str() {
        "cancel" => "Suppression annulée.".to_string(),

        "confirm" => {
            let deleted = ctx
                .data
                .game_repository
                .delete_game(game.id)
                .await
                .map_err(|err| {
                    internal_err(format!("Impossible de supprimer le match #{} : {err}", game.id))
                })?;

            if deleted {
                format!("🗑️ Match `#{}` supprimé.", game.id)
            } else {
                format!("Le match `#{}` avait déjà été supprimé.", game.id)
            }
        }

        id => {
            return Err(internal_err(format!("Bouton inconnu : {id}")));
        }
    };

    reply
        .edit(
            ctx.into(),
            CreateReply::default().content(content).components(vec![]),
        )
        .await?;

    Ok(())
}
