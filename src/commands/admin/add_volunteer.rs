use poise::CreateReply;

use crate::{
    commands::{
        arguments::{GameRef, TrimmedString},
        autocomplete_home_game, autocomplete_role, find_game, find_role, user_err,
        ApplicationContext, CommandResult,
    },
    ledger::Registrant,
    utils::formatting::role_line,
};

/// Inscrire quelqu'un qui n'est pas sur Discord.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "benevole-ajouter")]
pub async fn add_volunteer(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match, par exemple `#12`."]
    #[autocomplete = "autocomplete_home_game"]
    game: GameRef,

    #[rename = "poste"]
    #[description = "Numéro ou nom du poste."]
    #[autocomplete = "autocomplete_role"]
    role: String,

    #[rename = "noms"]
    #[description = "Un ou plusieurs noms, par exemple `Marie et Paul`."]
    names: TrimmedString,
) -> CommandResult {
    if names.is_empty() {
        return Err(user_err("Indiquez au moins un nom."));
    }

    let game = find_game(&ctx, game.into()).await?;
    let role_id = find_role(&game, &role)?.id;

    let added = ctx
        .data
        .ledger
        .sign_up(game.id, role_id, names.as_ref(), Registrant::Guest)
        .await?;

    let game = find_game(&ctx, game.id).await?;
    let role = find_role(&game, &role)?;

    ctx.send(
        CreateReply::default()
            .content(format!(
                "Ajouté(s) : {}.\n{}",
                added.join(", "),
                role_line(role)
            ))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
