use time::{Date, Month};

use crate::{models::Game, utils::french_dates::parse_french_date};

/// Its ISO date, else whatever its display label says.
pub fn known_date(game: &Game, fallback_year: i32) -> Option<Date> {
    game.fixture
        .date
        .or_else(|| parse_french_date(&game.fixture.date_label, fallback_year))
}

/// The date a game sorts by: its known date, else 1 January of `fallback_year`.
pub fn sort_date(game: &Game, fallback_year: i32) -> Date {
    known_date(game, fallback_year)
        .or_else(|| Date::from_calendar_date(fallback_year, Month::January, 1).ok())
        .unwrap_or(Date::MIN)
}

/// Stable sort by date. Games on the same day keep their relative order.
pub fn sort_chronological(games: &mut [Game], fallback_year: i32) {
    games.sort_by_key(|game| sort_date(game, fallback_year));
}
