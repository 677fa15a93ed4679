use std::fmt::Write;

use poise::CreateReply;

use crate::{
    commands::{
        arguments::{GameRef, TrimmedString},
        autocomplete_game, display_name, find_game, user_err, ApplicationContext, CommandError,
        CommandResult, Context,
    },
    ledger::{available_drivers, pending_requests, remaining_seats, LedgerError},
    models::{CarpoolEntry, CarpoolEntryId, CarpoolKind, Game, NewCarpoolEntry},
    utils::formatting::game_title,
};

#[poise::command(
    slash_command,
    guild_only,
    rename = "covoiturage",
    subcommands(
        "offer",
        "ask",
        "remove",
        "book",
        "accept",
        "reject",
        "cancel"
    )
)]
pub async fn carpool(_ctx: Context<'_>) -> CommandResult {
    Err(user_err("Choisissez une action : `/covoiturage proposer`, `/covoiturage demander`…"))
}

fn entry_id(id: &str) -> CarpoolEntryId {
    CarpoolEntryId(id.trim().trim_matches('`').to_string())
}

/// The entry, if the caller posted it or it carries their name.
fn owned_entry<'g>(
    ctx: &ApplicationContext<'_>,
    game: &'g Game,
    id: &CarpoolEntryId,
) -> Result<&'g CarpoolEntry, CommandError> {
    let entry = game
        .carpool
        .iter()
        .find(|entry| entry.id == *id)
        .ok_or_else(|| LedgerError::CarpoolEntryNotFound(id.clone()))?;

    if !entry.is_owned_by(ctx.author().id, &display_name(ctx)) {
        return Err(LedgerError::NotOwner(id.clone()).into());
    }

    Ok(entry)
}

fn new_entry(
    ctx: &ApplicationContext<'_>,
    kind: CarpoolKind,
    name: Option<TrimmedString>,
    seats: u32,
    phone: Option<TrimmedString>,
    departure: Option<TrimmedString>,
) -> NewCarpoolEntry {
    let non_empty = |value: Option<TrimmedString>| {
        value
            .filter(|value| !value.is_empty())
            .map(String::from)
    };

    NewCarpoolEntry {
        name: non_empty(name).unwrap_or_else(|| display_name(ctx)),
        owner: Some(ctx.author().id),
        kind,
        phone: non_empty(phone),
        seats,
        departure: non_empty(departure),
    }
}

/// Proposer des places dans sa voiture.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "proposer")]
pub async fn offer(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match, par exemple `#12`."]
    #[autocomplete = "autocomplete_game"]
    game: GameRef,

    #[rename = "places"]
    #[description = "Nombre de places libres."]
    #[min = 1]
    #[max = 8]
    seats: u32,

    #[rename = "depart"]
    #[description = "Lieu et heure de départ, par exemple `Parking du gymnase 13h15`."]
    departure: Option<TrimmedString>,

    #[rename = "telephone"]
    #[description = "Un numéro pour vous joindre."]
    phone: Option<TrimmedString>,

    #[rename = "nom"]
    #[description = "Le nom affiché. Par défaut, votre pseudo."]
    name: Option<TrimmedString>,
) -> CommandResult {
    let game = find_game(&ctx, game.into()).await?;
    let entry = new_entry(&ctx, CarpoolKind::Driver, name, seats, phone, departure);

    let id = ctx.data.ledger.add_carpool(game.id, entry).await?;

    ctx.send(
        CreateReply::default()
            .content(format!(
                "🚙 Merci ! {seats} place(s) proposée(s) pour {} (référence `{id}`).\n\
                 Les demandes de passagers apparaîtront dans `/matchs detail`.",
                game_title(&game.fixture)
            ))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// Chercher une place dans une voiture.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "demander")]
pub async fn ask(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match, par exemple `#12`."]
    #[autocomplete = "autocomplete_game"]
    game: GameRef,

    #[rename = "places"]
    #[description = "Nombre de places nécessaires. Par défaut, 1."]
    #[min = 1]
    #[max = 8]
    seats: Option<u32>,

    #[rename = "telephone"]
    #[description = "Un numéro pour vous joindre."]
    phone: Option<TrimmedString>,

    #[rename = "nom"]
    #[description = "Le nom affiché. Par défaut, votre pseudo."]
    name: Option<TrimmedString>,
) -> CommandResult {
    let game = find_game(&ctx, game.into()).await?;
    let entry = new_entry(
        &ctx,
        CarpoolKind::Passenger,
        name,
        seats.unwrap_or(1),
        phone,
        None,
    );

    let id = ctx.data.ledger.add_carpool(game.id, entry).await?;

    let mut content = format!(
        "🙋 Demande enregistrée pour {} (référence `{id}`).\n",
        game_title(&game.fixture)
    );

    let drivers = available_drivers(&game.carpool);
    if drivers.is_empty() {
        content.push_str("Aucun conducteur n'a encore de place libre, on vous tient au courant via `/matchs detail`.");
    } else {
        content.push_str("Conducteurs avec des places libres :\n");
        for driver in drivers {
            let _ = writeln!(
                content,
                " - `{}` **{}** · {} place(s)",
                driver.id,
                driver.name,
                remaining_seats(driver, &game.carpool)
            );
        }
        let _ = write!(
            content,
            "Réservez avec `/covoiturage reserver passager:{id} conducteur:<référence>`."
        );
    }

    ctx.send(CreateReply::default().content(content).ephemeral(true))
        .await?;

    Ok(())
}

/// Retirer une proposition ou une demande de covoiturage.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "retirer")]
pub async fn remove(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match, par exemple `#12`."]
    #[autocomplete = "autocomplete_game"]
    game: GameRef,

    #[rename = "reference"]
    #[description = "La référence de l'entrée, visible dans `/matchs detail`."]
    entry: String,
) -> CommandResult {
    let entry = entry_id(&entry);
    let name = display_name(&ctx);

    ctx.data
        .ledger
        .remove_carpool(game.into(), &entry, Some((ctx.author().id, &name)))
        .await?;

    ctx.send(
        CreateReply::default()
            .content(format!("🗑️ Entrée `{entry}` retirée."))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// Demander une place à un conducteur.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "reserver")]
pub async fn book(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match, par exemple `#12`."]
    #[autocomplete = "autocomplete_game"]
    game: GameRef,

    #[rename = "passager"]
    #[description = "La référence de votre demande."]
    passenger: String,

    #[rename = "conducteur"]
    #[description = "La référence du conducteur."]
    driver: String,
) -> CommandResult {
    let game = find_game(&ctx, game.into()).await?;
    let passenger = owned_entry(&ctx, &game, &entry_id(&passenger))?.id.clone();
    let driver = entry_id(&driver);

    ctx.data
        .ledger
        .request_seat(game.id, &passenger, &driver)
        .await?;

    ctx.send(
        CreateReply::default()
            .content(format!(
                "⏳ Demande envoyée au conducteur `{driver}`. Il doit maintenant l'accepter."
            ))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// Accepter un passager dans sa voiture.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "accepter")]
pub async fn accept(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match, par exemple `#12`."]
    #[autocomplete = "autocomplete_game"]
    game: GameRef,

    #[rename = "conducteur"]
    #[description = "La référence de votre proposition."]
    driver: String,

    #[rename = "passager"]
    #[description = "La référence du passager. Sans elle, les demandes en attente sont listées."]
    passenger: Option<String>,
) -> CommandResult {
    let game = find_game(&ctx, game.into()).await?;
    let driver = owned_entry(&ctx, &game, &entry_id(&driver))?.id.clone();

    let Some(passenger) = passenger else {
        let requests = pending_requests(&driver, &game.carpool);
        let content = if requests.is_empty() {
            "Aucune demande en attente.".to_string()
        } else {
            requests.iter().fold(
                "Demandes en attente :\n".to_string(),
                |acc, request| {
                    acc + &format!(
                        " - `{}` **{}** · {} place(s)\n",
                        request.id, request.name, request.seats
                    )
                },
            )
        };

        ctx.send(CreateReply::default().content(content).ephemeral(true))
            .await?;
        return Ok(());
    };

    let passenger = entry_id(&passenger);
    ctx.data
        .ledger
        .accept_passenger(game.id, &driver, &passenger)
        .await?;

    ctx.send(
        CreateReply::default()
            .content(format!("✅ Passager `{passenger}` confirmé. Bonne route !"))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// Refuser la demande d'un passager.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "refuser")]
pub async fn reject(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match, par exemple `#12`."]
    #[autocomplete = "autocomplete_game"]
    game: GameRef,

    #[rename = "conducteur"]
    #[description = "La référence de votre proposition."]
    driver: String,

    #[rename = "passager"]
    #[description = "La référence du passager."]
    passenger: String,
) -> CommandResult {
    let game = find_game(&ctx, game.into()).await?;
    let driver = owned_entry(&ctx, &game, &entry_id(&driver))?.id.clone();
    let passenger = entry_id(&passenger);

    ctx.data
        .ledger
        .reject_passenger(game.id, &driver, &passenger)
        .await?;

    ctx.send(
        CreateReply::default()
            .content(format!("Demande `{passenger}` refusée. Le passager peut en faire une autre."))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// Annuler sa demande de place.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "annuler")]
pub async fn cancel(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match, par exemple `#12`."]
    #[autocomplete = "autocomplete_game"]
    game: GameRef,

    #[rename = "passager"]
    #[description = "La référence de votre demande."]
    passenger: String,
) -> CommandResult {
    let game = find_game(&ctx, game.into()).await?;
    let passenger = owned_entry(&ctx, &game, &entry_id(&passenger))?.id.clone();

    ctx.data
        .ledger
        .cancel_request(game.id, &passenger)
        .await?;

    ctx.send(
        CreateReply::default()
            .content("Demande annulée.")
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::models::CarpoolEntryId;

    use super::entry_id;

    #[test]
    fn entry_references_are_cleaned() {
        assert_eq!(entry_id(" `V1StGXR8_Z` "), CarpoolEntryId("V1StGXR8_Z".to_string()));
    }
}
