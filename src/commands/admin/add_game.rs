use poise::CreateReply;

use crate::{
    commands::{
        arguments::{HumanKickoff, TrimmedString},
        internal_err, sorted_games, user_err, ApplicationContext, CommandResult,
    },
    import::is_duplicate,
    models::NewGame,
    utils::formatting::game_details,
};

/// Ajouter un match au planning.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "match-ajouter")]
pub async fn add_game(
    ctx: ApplicationContext<'_>,

    #[rename = "equipe"]
    #[description = "L'équipe du club, par exemple `U11 M1` ou `SCBA SM2`."]
    team: TrimmedString,

    #[rename = "adversaire"]
    #[description = "Le club adverse."]
    opponent: TrimmedString,

    #[rename = "coup-envoi"]
    #[description = "Date et heure, par exemple `14/12/2024 15h00` ou `14/12 15h`."]
    kickoff: HumanKickoff,

    #[rename = "domicile"]
    #[description = "Vrai pour un match à domicile."]
    is_home: bool,

    #[rename = "salle"]
    #[description = "Le gymnase. Par défaut, celui de l'équipe ou de l'adversaire s'il est connu."]
    location: Option<TrimmedString>,
) -> CommandResult {
    let settings = &ctx.data.settings;

    if team.is_empty() || opponent.is_empty() {
        return Err(user_err("L'équipe et l'adversaire sont obligatoires."));
    }

    let kickoff = kickoff.materialize(settings.today())?;
    let fixture = super::fixture(
        settings.profile.normalize_team(team.as_ref()),
        opponent.to_string().to_uppercase(),
        kickoff,
        is_home,
        location.filter(|location| !location.is_empty()).map(String::from),
    );

    let existing = sorted_games(&ctx).await?;
    if is_duplicate(&fixture, &existing) {
        return Err(user_err(format!(
            "Ce match existe déjà : {} vs {} le {} à {}.",
            fixture.team, fixture.opponent, fixture.date_label, fixture.time_label
        )));
    }

    let game = ctx
        .data
        .game_repository
        .create_game(&NewGame::with_default_roles(fixture))
        .await
        .map_err(|err| internal_err(format!("Impossible d'ajouter le match : {err}")))?;

    ctx.send(
        CreateReply::default()
            .content(format!(
                "Match `#{}` ajouté.\n{}",
                game.id,
                game_details(&game, settings)
            ))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
