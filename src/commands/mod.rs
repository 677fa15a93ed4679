mod admin;
mod announcements;
mod arguments;
mod carpool;
mod games;
mod help;
mod volunteer;

use crate::{
    ledger::LedgerError,
    models::{Game, GameId, Role},
    projection::sort_chronological,
    utils::french_dates::fold,
    BotState,
};

type CommandResult = Result<(), CommandError>;
type Context<'a> = poise::Context<'a, BotState, CommandError>;
type ApplicationContext<'a> = poise::ApplicationContext<'a, BotState, CommandError>;

#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    #[error("{message}")]
    User { message: String },
    #[error("{message}")]
    InvalidArgument { message: String },
    #[error("{message}")]
    Internal { message: String },
    #[error(transparent)]
    Serenity(#[from] serenity::Error),
}

fn user_err(message: impl Into<String>) -> CommandError {
    CommandError::User {
        message: message.into(),
    }
}

fn internal_err(message: impl Into<String>) -> CommandError {
    CommandError::Internal {
        message: message.into(),
    }
}

impl From<LedgerError> for CommandError {
    fn from(error: LedgerError) -> Self {
        match error {
            LedgerError::GameNotFound(id) => {
                user_err(format!("Le match #{id} n'existe pas ou a été supprimé."))
            }
            LedgerError::RoleNotFound(id) => user_err(format!("Le poste {id} n'existe pas.")),
            LedgerError::VolunteerNotFound(name) => {
                user_err(format!("« {name} » n'est pas inscrit(e) sur ce poste."))
            }
            LedgerError::CarpoolEntryNotFound(id) => {
                user_err(format!("Aucune entrée de covoiturage `{id}` sur ce match."))
            }
            LedgerError::RoleFull { role, capacity } => user_err(format!(
                "Le poste {role} est complet ({capacity} place(s)). Merci quand même !"
            )),
            LedgerError::EmptyName => user_err("Indiquez au moins un nom."),
            LedgerError::NotEnoughSeats { remaining, needed } => user_err(format!(
                "Pas assez de places : il en reste {remaining}, il en faut {needed}."
            )),
            LedgerError::NotOwner(id) => user_err(format!(
                "L'entrée `{id}` a été publiée par quelqu'un d'autre."
            )),
            LedgerError::Contention(id) => user_err(format!(
                "Le match #{id} est très sollicité en ce moment, réessayez dans un instant."
            )),
            LedgerError::Store(error) => internal_err(format!("Erreur de base de données : {error}")),
        }
    }
}

pub fn all_commands() -> Vec<poise::Command<BotState, CommandError>> {
    vec![
        volunteer::volunteer(),
        carpool::carpool(),
        games::games(),
        announcements::announcements(),
        admin::admin(),
        help::help(),
    ]
}

async fn find_game(ctx: &ApplicationContext<'_>, id: GameId) -> Result<Game, CommandError> {
    ctx.data
        .game_repository
        .get_game(id)
        .await
        .map_err(|err| internal_err(format!("Impossible de lire le match #{id} : {err}")))?
        .ok_or_else(|| user_err(format!("Le match #{id} n'existe pas ou a été supprimé.")))
}

/// Every game, in chronological order.
async fn sorted_games(ctx: &ApplicationContext<'_>) -> Result<Vec<Game>, CommandError> {
    let mut games = ctx
        .data
        .game_repository
        .list_games()
        .await
        .map_err(|err| internal_err(format!("Impossible de lire les matchs : {err}")))?;

    sort_chronological(&mut games, ctx.data.settings.today().year());
    Ok(games)
}

/// A role picked by number or name, with the game's roles listed when nothing matches.
fn find_role<'g>(game: &'g Game, role: &str) -> Result<&'g Role, CommandError> {
    game.find_role(role).ok_or_else(|| {
        let known = game
            .roles
            .iter()
            .map(|role| format!("`{}` {}", role.id, role.name))
            .collect::<Vec<_>>()
            .join(", ");

        if known.is_empty() {
            user_err(format!("Le match #{} n'a aucun poste de bénévole.", game.id))
        } else {
            user_err(format!("Poste « {role} » introuvable. Postes du match : {known}."))
        }
    })
}

/// The caller's name as shown in rosters.
fn display_name(ctx: &ApplicationContext<'_>) -> String {
    ctx.author().display_name().to_string()
}

/// `12 · U11 M1 vs ROYAT BC · Samedi 14 Décembre 2024`, understood by [`arguments::GameRef`].
fn game_choice(game: &Game) -> String {
    let choice = format!(
        "{} · {} vs {} · {}",
        game.id, game.fixture.team, game.fixture.opponent, game.fixture.date_label
    );
    // Discord caps choice names at 100 characters.
    choice.chars().take(100).collect()
}

async fn autocomplete_games(
    ctx: Context<'_>,
    partial: &str,
    keep: impl Fn(&Game) -> bool,
) -> Vec<String> {
    let Ok(games) = ctx.data().game_repository.list_games().await else {
        return Vec::new();
    };

    let settings = &ctx.data().settings;
    let mut games = crate::projection::filter_upcoming(games, settings.now_local());
    sort_chronological(&mut games, settings.today().year());

    let partial = fold(partial.trim());
    games
        .iter()
        .filter(|game| keep(game))
        .map(game_choice)
        .filter(|choice| fold(choice).contains(&partial))
        .take(25)
        .collect()
}

async fn autocomplete_game<'a>(ctx: Context<'_>, partial: &'a str) -> impl Iterator<Item = String> + 'a {
    autocomplete_games(ctx, partial, |_| true).await.into_iter()
}

async fn autocomplete_home_game<'a>(
    ctx: Context<'_>,
    partial: &'a str,
) -> impl Iterator<Item = String> + 'a {
    autocomplete_games(ctx, partial, |game| game.fixture.is_home)
        .await
        .into_iter()
}

fn matching_teams(teams: Vec<String>, partial: &str) -> impl Iterator<Item = String> {
    let partial = fold(partial.trim());
    teams
        .into_iter()
        .filter(move |team| fold(team).contains(&partial))
        .take(25)
}

/// Teams offered to the caller: their favourites when they have some.
async fn autocomplete_team<'a>(ctx: Context<'_>, partial: &'a str) -> impl Iterator<Item = String> + 'a {
    let games = ctx.data().game_repository.list_games().await.unwrap_or_default();
    let favorites = ctx
        .data()
        .favorite_team_repository
        .list(ctx.author().id)
        .await
        .unwrap_or_default();

    matching_teams(crate::projection::preferred_teams(&games, &favorites), partial)
}

async fn autocomplete_any_team<'a>(ctx: Context<'_>, partial: &'a str) -> impl Iterator<Item = String> + 'a {
    let games = ctx.data().game_repository.list_games().await.unwrap_or_default();

    matching_teams(crate::projection::team_choices(&games), partial)
}

async fn autocomplete_role<'a>(ctx: Context<'_>, partial: &'a str) -> impl Iterator<Item = String> + 'a {
    let mut names: Vec<String> = match ctx.data().game_repository.list_games().await {
        Ok(games) => games
            .into_iter()
            .flat_map(|game| game.roles.into_iter().map(|role| role.name))
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names.dedup();

    let partial = fold(partial.trim());
    names
        .into_iter()
        .filter(move |name| fold(name).contains(&partial))
        .take(25)
}
