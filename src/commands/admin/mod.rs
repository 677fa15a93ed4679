mod add_game;
mod add_volunteer;
mod announce;
mod capacity;
mod deactivate_announcement;
mod delete_game;
mod edit_game;
mod import;
mod remove_volunteer;
mod stats;

use time::PrimitiveDateTime;

use crate::{
    import::{away_gym, default_home_venue, AWAY_VENUE},
    models::Fixture,
    utils::french_dates::{format_date_label, format_time_label},
};

use super::{user_err, CommandResult, Context};

#[poise::command(
    slash_command,
    guild_only,
    subcommands(
        "add_game::add_game",
        "edit_game::edit_game",
        "delete_game::delete_game",
        "capacity::capacity",
        "add_volunteer::add_volunteer",
        "remove_volunteer::remove_volunteer",
        "import::import",
        "stats::stats",
        "announce::announce",
        "deactivate_announcement::deactivate_announcement"
    ),
    required_permissions = "ADMINISTRATOR",
    default_member_permissions = "ADMINISTRATOR"
)]
pub async fn admin(_ctx: Context<'_>) -> CommandResult {
    Err(user_err("Choisissez une action d'administration, par exemple `/admin match-ajouter`."))
}

/// The club gym for home games, the opponent's gym when it is known for away games.
fn default_location(team: &str, opponent: &str, is_home: bool) -> String {
    if is_home {
        default_home_venue(team).to_string()
    } else {
        away_gym(opponent).unwrap_or(AWAY_VENUE).to_string()
    }
}

fn fixture(
    team: String,
    opponent: String,
    kickoff: PrimitiveDateTime,
    is_home: bool,
    location: Option<String>,
) -> Fixture {
    let location = location.unwrap_or_else(|| default_location(&team, &opponent, is_home));

    Fixture {
        team,
        opponent,
        date_label: format_date_label(kickoff.date()),
        date: Some(kickoff.date()),
        time_label: format_time_label(kickoff.time()),
        location,
        is_home,
    }
}
