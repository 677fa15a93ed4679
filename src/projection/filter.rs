use std::collections::{BTreeSet, HashSet};

use time::{Duration, PrimitiveDateTime, Time};

use crate::{
    models::{Game, GameId, UserRegistration},
    utils::french_dates::parse_time_label,
};

/// How long after kickoff a game still counts as upcoming.
pub const GAME_GRACE: Duration = Duration::hours(3);

/// Who is asking for "my games".
#[derive(Clone, Debug)]
pub enum Viewer {
    /// A Discord member, matched through their registration index.
    Member { game_ids: HashSet<GameId> },
    /// Matched by a remembered display name against volunteers and carpool entries.
    Guest { name: Option<String> },
}

/// `None` keeps every game.
pub fn filter_by_team(games: Vec<Game>, team: Option<&str>) -> Vec<Game> {
    match team {
        Some(team) => games
            .into_iter()
            .filter(|game| game.fixture.team == team)
            .collect(),
        None => games,
    }
}

/// Games the viewer takes part in. A guest without a name gets nothing.
pub fn filter_to_mine(games: Vec<Game>, viewer: &Viewer) -> Vec<Game> {
    match viewer {
        Viewer::Member { game_ids } => games
            .into_iter()
            .filter(|game| game_ids.contains(&game.id))
            .collect(),
        Viewer::Guest { name: Some(name) } if !name.trim().is_empty() => games
            .into_iter()
            .filter(|game| game.involves_name(name))
            .collect(),
        Viewer::Guest { .. } => Vec::new(),
    }
}

/// Drops games that ended, counting [`GAME_GRACE`] after kickoff. Undated games stay.
pub fn filter_upcoming(games: Vec<Game>, now_local: PrimitiveDateTime) -> Vec<Game> {
    games
        .into_iter()
        .filter(|game| match game.fixture.kickoff() {
            Some(kickoff) => kickoff + GAME_GRACE > now_local,
            None => true,
        })
        .collect()
}

/// A mission stays listed until three hours after kickoff.
pub fn registration_is_upcoming(
    registration: &UserRegistration,
    now_local: PrimitiveDateTime,
) -> bool {
    let Some(date) = registration.game_date else {
        return true;
    };
    let time = parse_time_label(&registration.game_time).unwrap_or(Time::MIDNIGHT);

    PrimitiveDateTime::new(date, time) + GAME_GRACE > now_local
}

fn team_priority(team: &str) -> u8 {
    const ORDER: &[&str] = &["U9", "U11", "U13", "U15", "U18", "SENIOR", "VETERAN"];

    let team = team.to_uppercase();
    ORDER
        .iter()
        .position(|category| team.contains(category))
        .map(|position| position as u8 + 1)
        .unwrap_or(99)
}

/// Distinct team names, youngest category first, then alphabetically.
pub fn team_choices(games: &[Game]) -> Vec<String> {
    let mut teams = games
        .iter()
        .map(|game| game.fixture.team.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();

    teams.sort_by_key(|team| team_priority(team));
    teams
}

/// The member's favourite teams when they have any, otherwise every team.
pub fn preferred_teams(games: &[Game], favorites: &[String]) -> Vec<String> {
    if favorites.is_empty() {
        return team_choices(games);
    }

    let mut teams = favorites.to_vec();
    teams.sort();
    teams.dedup();
    teams.sort_by_key(|team| team_priority(team));
    teams
}

/// Games of any of `teams`.
pub fn filter_by_teams(games: Vec<Game>, teams: &[String]) -> Vec<Game> {
    games
        .into_iter()
        .filter(|game| teams.contains(&game.fixture.team))
        .collect()
}
