use std::fmt::Write;

use poise::{serenity_prelude::CreateAttachment, ChoiceParameter, CreateReply};
use time::Duration;

use crate::{
    commands::{
        arguments::{GameRef, TrimmedString},
        autocomplete_any_team, autocomplete_game, autocomplete_team, find_game, internal_err,
        sorted_games, user_err, ApplicationContext, CommandResult, Context,
    },
    models::Game,
    projection::{
        filter_by_team, filter_by_teams, filter_to_mine, filter_upcoming, group_by_month,
        group_by_week, planning_week, registration_is_upcoming, team_choices, GameGroup, Viewer,
    },
    utils::{
        calendar::{self, game_entry, mission_entry},
        formatting::{game_details, game_line, registration_line, truncate_message},
    },
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ChoiceParameter)]
pub enum ListView {
    #[default]
    #[name = "Par mois"]
    Month,
    #[name = "Par semaine"]
    Week,
}

#[poise::command(
    slash_command,
    guild_only,
    rename = "matchs",
    subcommands(
        "list",
        "detail",
        "week",
        "missions",
        "teams",
        "calendar_file",
        "favorites"
    )
)]
pub async fn games(_ctx: Context<'_>) -> CommandResult {
    Err(user_err("Utilisez `/matchs liste`, `/matchs detail` ou `/matchs semaine`."))
}

fn render_groups(title: &str, groups: &[GameGroup], now_local: time::PrimitiveDateTime) -> String {
    let mut content = format!("# {title}\n");
    for group in groups {
        let _ = writeln!(content, "### {}", group.label);
        for game in &group.games {
            let _ = writeln!(content, "{}", game_line(game, now_local));
        }
    }
    truncate_message(content)
}

/// Les prochains matchs du club.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "liste")]
pub async fn list(
    ctx: ApplicationContext<'_>,

    #[rename = "equipe"]
    #[description = "Seulement cette équipe."]
    #[autocomplete = "autocomplete_team"]
    team: Option<String>,

    #[rename = "vue"]
    #[description = "Regrouper par mois ou par semaine."]
    view: Option<ListView>,

    #[rename = "mes-matchs"]
    #[description = "Seulement les matchs où vous êtes inscrit(e)."]
    mine: Option<bool>,

    #[rename = "nom"]
    #[description = "Seulement les matchs où ce nom apparaît (bénévole ou covoiturage)."]
    name: Option<TrimmedString>,

    #[rename = "favoris"]
    #[description = "Seulement vos équipes favorites (voir `/matchs favoris`)."]
    favorites_only: Option<bool>,
) -> CommandResult {
    let settings = &ctx.data.settings;
    let now_local = settings.now_local();

    let games = filter_upcoming(sorted_games(&ctx).await?, now_local);
    let mut games = filter_by_team(games, team.as_deref());

    if favorites_only.unwrap_or(false) {
        let favorites = favorite_teams(&ctx).await?;
        if favorites.is_empty() {
            return Err(user_err(
                "Vous n'avez pas encore d'équipe favorite. Ajoutez-en avec `/matchs favoris`.",
            ));
        }
        games = filter_by_teams(games, &favorites);
    }

    if let Some(name) = name {
        games = filter_to_mine(
            games,
            &Viewer::Guest {
                name: Some(name.into()),
            },
        );
    } else if mine.unwrap_or(false) {
        let game_ids = ctx
            .data
            .registration_repository
            .member_game_ids(ctx.author().id)
            .await
            .map_err(|err| internal_err(format!("Impossible de lire vos inscriptions : {err}")))?;
        games = filter_to_mine(games, &Viewer::Member { game_ids });
    }

    if games.is_empty() {
        ctx.send(
            CreateReply::default()
                .content("Aucun match à venir pour ces critères.")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let groups = match view.unwrap_or_default() {
        ListView::Month => group_by_month(games, settings.today().year()),
        ListView::Week => group_by_week(games, settings.today()),
    };

    let title = match &team {
        Some(team) => format!("Matchs à venir · {team}"),
        None => "Matchs à venir".to_string(),
    };

    ctx.send(
        CreateReply::default()
            .content(render_groups(&title, &groups, now_local))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// Les postes de bénévoles et le covoiturage d'un match.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "detail")]
pub async fn detail(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match, par exemple `#12`."]
    #[autocomplete = "autocomplete_game"]
    game: GameRef,
) -> CommandResult {
    let game = find_game(&ctx, game.into()).await?;

    ctx.send(
        CreateReply::default()
            .content(game_details(&game, &ctx.data.settings))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

fn render_week(
    games: &[Game],
    reference: time::Date,
    now_local: time::PrimitiveDateTime,
) -> String {
    let days = planning_week(games, reference);

    let mut content = match (days.first(), days.last()) {
        (Some(first), Some(last)) => format!("# Planning du {} au {}\n", first.label, last.label),
        _ => "# Planning\n".to_string(),
    };

    for day in &days {
        let _ = writeln!(content, "### {}", day.label);
        if day.games.is_empty() {
            content.push_str("_Pas de match_\n");
        }
        for game in &day.games {
            let _ = writeln!(content, "{}", game_line(game, now_local));
        }
    }

    truncate_message(content)
}

/// Le planning d'une semaine, jour par jour.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "semaine")]
pub async fn week(
    ctx: ApplicationContext<'_>,

    #[rename = "decalage"]
    #[description = "0 pour cette semaine, 1 pour la suivante, -1 pour la précédente."]
    #[min = -4]
    #[max = 12]
    offset: Option<i64>,
) -> CommandResult {
    let settings = &ctx.data.settings;
    let reference = settings.today() + Duration::weeks(offset.unwrap_or(0));
    let games = sorted_games(&ctx).await?;

    ctx.send(
        CreateReply::default()
            .content(render_week(&games, reference, settings.now_local()))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}

/// Vos prochaines missions de bénévole.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "missions")]
pub async fn missions(ctx: ApplicationContext<'_>) -> CommandResult {
    let now_local = ctx.data.settings.now_local();

    let registrations = ctx
        .data
        .registration_repository
        .list_for_member(ctx.author().id)
        .await
        .map_err(|err| internal_err(format!("Impossible de lire vos missions : {err}")))?;

    let upcoming = registrations
        .iter()
        .filter(|registration| registration_is_upcoming(registration, now_local))
        .collect::<Vec<_>>();

    let content = if upcoming.is_empty() {
        "Vous n'avez aucune mission à venir. Les postes libres sont dans `/matchs liste` !"
            .to_string()
    } else {
        let list = upcoming.iter().fold(String::new(), |acc, registration| {
            acc + &format!(" - {}\n", registration_line(registration))
        });
        truncate_message(format!("# Vos missions\n{list}"))
    };

    ctx.send(CreateReply::default().content(content).ephemeral(true))
        .await?;

    Ok(())
}

async fn favorite_teams(
    ctx: &ApplicationContext<'_>,
) -> Result<Vec<String>, crate::commands::CommandError> {
    ctx.data
        .favorite_team_repository
        .list(ctx.author().id)
        .await
        .map_err(|err| internal_err(format!("Impossible de lire vos équipes favorites : {err}")))
}

fn render_teams(teams: &[String], favorites: &[String]) -> String {
    let teams = teams
        .iter()
        .map(|team| {
            if favorites.contains(team) {
                format!("⭐ {team}")
            } else {
                team.clone()
            }
        })
        .collect::<Vec<_>>();

    format!("# Équipes\n{}", teams.join(" · "))
}

/// Les équipes du club qui ont des matchs programmés.
#[poise::command(slash_command, rename = "equipes")]
pub async fn teams(ctx: ApplicationContext<'_>) -> CommandResult {
    let games = sorted_games(&ctx).await?;
    let teams = team_choices(&games);

    let content = if teams.is_empty() {
        "Aucun match programmé pour l'instant.".to_string()
    } else {
        render_teams(&teams, &favorite_teams(&ctx).await?)
    };

    ctx.send(CreateReply::default().content(content).ephemeral(true))
        .await?;

    Ok(())
}

/// Suivre une équipe, ou ne plus la suivre. Les favorites sont proposées en premier.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "favoris")]
pub async fn favorites(
    ctx: ApplicationContext<'_>,

    #[rename = "equipe"]
    #[description = "L'équipe à ajouter ou retirer. Sans elle, vos favorites sont listées."]
    #[autocomplete = "autocomplete_any_team"]
    team: Option<TrimmedString>,
) -> CommandResult {
    let mut content = String::new();

    if let Some(team) = team.filter(|team| !team.is_empty()) {
        let games = sorted_games(&ctx).await?;
        if !team_choices(&games).iter().any(|known| known == team.as_ref()) {
            return Err(user_err(format!(
                "Aucun match pour l'équipe « {team} ». Voir `/matchs equipes`."
            )));
        }

        let followed = ctx
            .data
            .favorite_team_repository
            .toggle(ctx.author().id, team.as_ref())
            .await
            .map_err(|err| internal_err(format!("Impossible d'enregistrer vos favoris : {err}")))?;

        let _ = writeln!(
            content,
            "{}",
            if followed {
                format!("⭐ {team} ajoutée à vos favorites.")
            } else {
                format!("{team} retirée de vos favorites.")
            }
        );
    }

    let favorites = favorite_teams(&ctx).await?;
    if favorites.is_empty() {
        content.push_str("Aucune équipe favorite : toutes les équipes vous sont proposées.");
    } else {
        let _ = write!(content, "Vos équipes : {}", favorites.join(" · "));
    }

    ctx.send(CreateReply::default().content(content).ephemeral(true))
        .await?;

    Ok(())
}

/// Un fichier agenda (.ics) pour un match, ou pour toutes vos missions à venir.
#[tracing::instrument(skip(ctx))]
#[poise::command(slash_command, rename = "calendrier")]
pub async fn calendar_file(
    ctx: ApplicationContext<'_>,

    #[rename = "match"]
    #[description = "Le match. Sans lui, vos missions de bénévole."]
    #[autocomplete = "autocomplete_game"]
    game: Option<GameRef>,
) -> CommandResult {
    let settings = &ctx.data.settings;

    let (entries, file_name) = match game {
        Some(game) => {
            let game = find_game(&ctx, game.into()).await?;
            let entry = game_entry(&game, settings).ok_or_else(|| {
                user_err("La date ou l'heure de ce match n'est pas encore connue.")
            })?;
            (vec![entry], calendar::file_name(&game))
        }

        None => {
            let now_local = settings.now_local();
            let entries = ctx
                .data
                .registration_repository
                .list_for_member(ctx.author().id)
                .await
                .map_err(|err| internal_err(format!("Impossible de lire vos missions : {err}")))?
                .iter()
                .filter(|registration| registration_is_upcoming(registration, now_local))
                .filter_map(|registration| mission_entry(registration, settings))
                .collect::<Vec<_>>();

            if entries.is_empty() {
                return Err(user_err("Vous n'avez aucune mission datée à venir."));
            }
            (entries, "missions.ics".to_string())
        }
    };

    let count = entries.len();
    let ics = calendar::to_ics(&entries);

    ctx.send(
        CreateReply::default()
            .content(format!(
                "📅 {count} événement(s). Ouvrez le fichier pour l'ajouter à votre agenda."
            ))
            .attachment(CreateAttachment::bytes(ics.into_bytes(), file_name))
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
