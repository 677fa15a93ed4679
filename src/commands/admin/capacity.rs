use poise::CreateReply;

use crate::{
    commands::{
        arguments::GameRef, autocomplete_home_game, autocomplete_role, find_game, find_role,
        ApplicationContext, CommandResult,
    },
    models::Capacity,
};

/// Changer le nombre de places d'un poste. 0 pour illimité.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "capacite")]
pub async fn capacity(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match, par exemple `#12`."]
    #[autocomplete = "autocomplete_home_game"]
    game: GameRef,

    #[rename = "poste"]
    #[description = "Numéro ou nom du poste."]
    #[autocomplete = "autocomplete_role"]
    role: String,

    #[rename = "places"]
    #[description = "Nombre de places, 0 pour illimité."]
    #[max = 20]
    slots: u32,
) -> CommandResult {
    let game = find_game(&ctx, game.into()).await?;
    let role = find_role(&game, &role)?;
    let capacity = Capacity::from_slots(slots);

    ctx.data
        .ledger
        .set_capacity(game.id, role.id, capacity)
        .await?;

    let mut content = format!(
        "Poste **{}** du match `#{}` : {capacity} place(s).",
        role.name, game.id
    );
    if let Capacity::Limited(slots) = capacity {
        let registered = role.volunteers.len();
        if registered > slots.get() as usize {
            content.push_str(&format!(
                "\n⚠️ {registered} personnes sont déjà inscrites, personne n'a été retiré."
            ));
        }
    }

    ctx.send(CreateReply::default().content(content).ephemeral(true))
        .await?;

    Ok(())
}
