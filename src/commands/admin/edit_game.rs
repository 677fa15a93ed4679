use poise::CreateReply;

use crate::{
    commands::{
        arguments::{GameRef, HumanKickoff, TrimmedString},
        autocomplete_game, find_game, internal_err, user_err, ApplicationContext, CommandResult,
    },
    utils::formatting::game_details,
};

/// Modifier un match : équipe, adversaire, horaire, lieu.
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "match-modifier")]
pub async fn edit_game(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match, par exemple `#12`."]
    #[autocomplete = "autocomplete_game"]
    game: GameRef,

    #[rename = "equipe"]
    #[description = "Nouvelle équipe."]
    team: Option<TrimmedString>,

    #[rename = "adversaire"]
    #[description = "Nouvel adversaire."]
    opponent: Option<TrimmedString>,

    #[rename = "coup-envoi"]
    #[description = "Nouvelle date et heure, par exemple `14/12/2024 15h00`."]
    kickoff: Option<HumanKickoff>,

    #[rename = "domicile"]
    #[description = "Vrai pour un match à domicile."]
    is_home: Option<bool>,

    #[rename = "salle"]
    #[description = "Nouveau gymnase."]
    location: Option<TrimmedString>,
) -> CommandResult {
    let settings = &ctx.data.settings;
    let game = find_game(&ctx, game.into()).await?;
    let current = &game.fixture;

    let team = team
        .filter(|team| !team.is_empty())
        .map(|team| settings.profile.normalize_team(team.as_ref()))
        .unwrap_or_else(|| current.team.clone());
    let opponent = opponent
        .filter(|opponent| !opponent.is_empty())
        .map(|opponent| opponent.to_string().to_uppercase())
        .unwrap_or_else(|| current.opponent.clone());
    let is_home_changed = is_home.is_some_and(|is_home| is_home != current.is_home);
    let is_home = is_home.unwrap_or(current.is_home);
    let location = location
        .filter(|location| !location.is_empty())
        .map(String::from)
        .or_else(|| (!is_home_changed).then(|| current.location.clone()));

    let fixture = match kickoff {
        Some(kickoff) => super::fixture(
            team,
            opponent,
            kickoff.materialize(settings.today())?,
            is_home,
            location,
        ),
        None => {
            let mut fixture = current.clone();
            fixture.location = location
                .unwrap_or_else(|| super::default_location(&team, &opponent, is_home));
            fixture.team = team;
            fixture.opponent = opponent;
            fixture.is_home = is_home;
            fixture
        }
    };

    if fixture == *current {
        return Err(user_err("Rien à modifier : indiquez au moins un nouveau champ."));
    }

    let updated = ctx
        .data
        .game_repository
        .update_fixture(game.id, &fixture)
        .await
        .map_err(|err| internal_err(format!("Impossible de modifier le match #{} : {err}", game.id)))?;

    if !updated {
        return Err(user_err(format!("Le match #{} n'existe plus.", game.id)));
    }

    let mut game = game;
    game.fixture = fixture;

    ctx.send(
        CreateReply::default()
            .content(format!("Match modifié.\n{}", game_details(&game, settings)))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
