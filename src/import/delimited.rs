use lazy_regex::{regex_captures, regex_find, regex_is_match};
use time::{Date, Month};

use crate::{
    models::Fixture,
    utils::french_dates::{
        format_date_label, format_time_label, parse_month, parse_time_label, season_year,
    },
};

use super::{
    team::{default_home_venue, ClubProfile, AWAY_VENUE},
    ImportLineError, ImportReport,
};

const NO_DATE: &str = "Date introuvable";
const NO_CLUB: &str = "Impossible de déterminer Domicile/Extérieur (club non détecté)";

/// Parses `14/12/2024` or `13 sept.`; a missing year is inferred from the season of `today`.
pub fn parse_import_date(text: &str, today: Date) -> Option<Date> {
    if let Some((_, day, month, year)) = regex_captures!(r"(\d{1,2})/(\d{1,2})/(\d{4})", text) {
        let month = Month::try_from(month.parse::<u8>().ok()?).ok()?;
        return Date::from_calendar_date(year.parse().ok()?, month, day.parse().ok()?).ok();
    }

    let (_, day, month) = regex_captures!(r"(?i)(\d{1,2})\s+([a-zéû]+)", text)?;
    let month = parse_month(month)?;
    Date::from_calendar_date(season_year(month, today), month, day.parse().ok()?).ok()
}

fn delimiter_of(line: &str) -> u8 {
    if line.contains('\t') {
        b'\t'
    } else if line.contains(',') {
        b','
    } else {
        b';'
    }
}

/// Non-empty, trimmed cells of one line.
fn split_cells(line: &str) -> Result<Vec<String>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter_of(line))
        .from_reader(line.as_bytes());

    let mut record = csv::StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Ok(Vec::new());
    }

    Ok(record
        .iter()
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect())
}

fn is_header(line: &str) -> bool {
    let line = line.to_lowercase();
    line.contains("date") || line.contains("rencontre")
}

enum LineOutcome {
    Parsed(Fixture),
    Skipped,
}

/// `Date;Heure;Domicile;Visiteur;Salle` lines, separated by `;`, tabs or commas.
pub fn parse_delimited(text: &str, profile: &ClubProfile, today: Date) -> ImportReport {
    let mut report = ImportReport::default();

    let lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect::<Vec<_>>();

    let skip = match lines.first() {
        Some((_, first)) if is_header(first) => 1,
        _ => 0,
    };

    for (number, line) in lines.into_iter().skip(skip) {
        match parse_line(line, profile, today) {
            Ok(LineOutcome::Parsed(fixture)) => report.fixtures.push(fixture),
            Ok(LineOutcome::Skipped) => {}
            Err(error) => report.errors.push(ImportLineError {
                line: number,
                content: line.to_string(),
                error,
            }),
        }
    }

    report
}

fn parse_line(line: &str, profile: &ClubProfile, today: Date) -> Result<LineOutcome, String> {
    let cells = split_cells(line).map_err(|err| format!("Erreur: {err}"))?;

    let Some(date_index) = cells
        .iter()
        .position(|cell| regex_is_match!(r"(?i)\d{2}/\d{2}|\d{1,2}\s+[a-zéû]+", cell))
    else {
        // Very short lines are stray fragments, not games.
        return if line.chars().count() > 5 {
            Err(NO_DATE.to_string())
        } else {
            Ok(LineOutcome::Skipped)
        };
    };

    let date_cell = &cells[date_index];
    let (time_cell, first_team) = match regex_find!(r"\d{1,2}[:hH]\d{2}", date_cell) {
        Some(time) => (time, date_index + 1),
        None => match cells.get(date_index + 1) {
            Some(time) => (time.as_str(), date_index + 2),
            None => return Ok(LineOutcome::Skipped),
        },
    };

    let (Some(home_team), Some(away_team)) = (cells.get(first_team), cells.get(first_team + 1))
    else {
        return Ok(LineOutcome::Skipped);
    };
    let venue = cells.get(first_team + 2).map(String::as_str).unwrap_or("");

    let Some(date) = parse_import_date(date_cell, today) else {
        return Ok(LineOutcome::Skipped);
    };
    let time_label = parse_time_label(time_cell)
        .map(format_time_label)
        .unwrap_or_else(|| time_cell.replace(':', "H"));

    let (team, opponent, is_home) = resolve_sides(home_team, away_team, venue, profile)?;
    let team = profile.normalize_team(&team);

    let location = if !venue.is_empty() {
        venue.to_string()
    } else if is_home {
        default_home_venue(&team).to_string()
    } else {
        AWAY_VENUE.to_string()
    };

    Ok(LineOutcome::Parsed(Fixture {
        team,
        opponent,
        date_label: format_date_label(date),
        date: Some(date),
        time_label,
        location,
        is_home,
    }))
}

/// Works out which side is the club: `(team, opponent, is_home)`.
fn resolve_sides(
    home_team: &str,
    away_team: &str,
    venue: &str,
    profile: &ClubProfile,
) -> Result<(String, String, bool), String> {
    if profile.is_club_team(home_team) {
        return Ok((home_team.to_string(), away_team.to_string(), true));
    }
    if profile.is_club_team(away_team) {
        return Ok((away_team.to_string(), home_team.to_string(), false));
    }

    let default_team = profile.default_team.clone();

    if profile.is_home_venue(venue) {
        return Ok((default_team, away_team.to_string(), true));
    }

    let mentions_default_team = |team: &str| {
        let team = team.to_uppercase();
        profile
            .default_team
            .split_whitespace()
            .any(|part| team.contains(&part.to_uppercase()))
    };

    match (mentions_default_team(home_team), mentions_default_team(away_team)) {
        (true, false) => Ok((default_team, away_team.to_string(), true)),
        (false, true) => Ok((default_team, home_team.to_string(), false)),
        _ => Err(NO_CLUB.to_string()),
    }
}
