use poise::CreateReply;

use crate::{
    commands::{
        arguments::{GameRef, TrimmedString},
        autocomplete_home_game, autocomplete_role, find_game, find_role, user_err,
        ApplicationContext, CommandResult,
    },
    ledger::Registrant,
};

/// Retirer un nom d'un poste, quel que soit qui l'a inscrit.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "benevole-retirer")]
pub async fn remove_volunteer(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match, par exemple `#12`."]
    #[autocomplete = "autocomplete_home_game"]
    game: GameRef,

    #[rename = "poste"]
    #[description = "Numéro ou nom du poste."]
    #[autocomplete = "autocomplete_role"]
    role: String,

    #[rename = "nom"]
    #[description = "Le nom tel qu'il apparaît sur le planning."]
    name: TrimmedString,
) -> CommandResult {
    let game = find_game(&ctx, game.into()).await?;
    let role = find_role(&game, &role)?;

    let removed = ctx
        .data
        .ledger
        .withdraw(game.id, role.id, name.as_ref(), Registrant::Guest)
        .await?;

    if !removed {
        return Err(user_err(format!(
            "« {name} » n'est pas inscrit(e) au poste **{}**.",
            role.name
        )));
    }

    ctx.send(
        CreateReply::default()
            .content(format!(
                "« {name} » retiré(e) du poste **{}** du match `#{}`.",
                role.name, game.id
            ))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
