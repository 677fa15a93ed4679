//! Bulk fixture import from text copied out of the federation website.

mod block;
mod delimited;
mod duplicates;
mod gyms;
mod team;

use std::path::Path;

use thiserror::Error;
use time::Date;
use tracing::{info, warn};

use crate::models::{Fixture, Game, NewGame};

pub use block::{looks_like_blocks, parse_blocks};
pub use delimited::{parse_delimited, parse_import_date};
pub use duplicates::is_duplicate;
pub use gyms::away_gym;
pub use team::{default_home_venue, ClubProfile, AWAY_VENUE};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportLineError {
    /// 1-based, counting blank lines.
    pub line: usize,
    pub content: String,
    pub error: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub fixtures: Vec<Fixture>,
    pub errors: Vec<ImportLineError>,
    /// Fixtures dropped because the game already exists.
    pub duplicates: usize,
}

impl ImportReport {
    /// Drops fixtures matching an existing game, or an earlier line of the same import.
    pub fn without_duplicates(mut self, existing: &[Game]) -> ImportReport {
        let mut kept: Vec<Fixture> = Vec::with_capacity(self.fixtures.len());

        for fixture in std::mem::take(&mut self.fixtures) {
            let seen = kept.iter().any(|other| {
                other.date == fixture.date
                    && other.time_label == fixture.time_label
                    && other.team == fixture.team
                    && other.opponent == fixture.opponent
            });

            if seen || is_duplicate(&fixture, existing) {
                self.duplicates += 1;
            } else {
                kept.push(fixture);
            }
        }

        self.fixtures = kept;
        self
    }

    pub fn into_new_games(self) -> Vec<NewGame> {
        self.fixtures
            .into_iter()
            .map(NewGame::with_default_roles)
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Could not read fixture file: {0}")]
    Io(#[from] std::io::Error),
    #[error("No game found in the import ({0} lines rejected)")]
    NothingParsed(usize),
}

/// Parses either format, then fills in away gyms the club knows about.
pub fn parse_fixtures(text: &str, profile: &ClubProfile, today: Date) -> ImportReport {
    let mut report = if looks_like_blocks(text) {
        parse_blocks(text, profile, today)
    } else {
        parse_delimited(text, profile, today)
    };

    for fixture in report.fixtures.iter_mut() {
        if !fixture.is_home && fixture.location == AWAY_VENUE {
            if let Some(gym) = away_gym(&fixture.opponent) {
                fixture.location = gym.to_string();
            }
        }
    }

    report
}

/// Reads a seed file for the first start of the bot.
#[tracing::instrument(skip(profile))]
pub async fn load_fixture_file(
    path: &Path,
    profile: &ClubProfile,
    today: Date,
) -> Result<Vec<NewGame>, ImportError> {
    let text = tokio::fs::read_to_string(path).await?;
    let report = parse_fixtures(&text, profile, today).without_duplicates(&[]);

    for error in &report.errors {
        warn!(
            "Skipping line {} of the fixture file ({}): {}",
            error.line, error.error, error.content
        );
    }

    if report.fixtures.is_empty() {
        return Err(ImportError::NothingParsed(report.errors.len()));
    }

    info!("Read {} fixtures from {}", report.fixtures.len(), path.display());
    Ok(report.into_new_games())
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::models::{Game, GameId};

    use super::{parse_fixtures, ClubProfile};

    const TODAY: time::Date = date!(2024 - 11 - 20);

    #[test]
    fn away_games_get_known_gyms() {
        let report = parse_fixtures(
            "21/12/2024;20:30;SORGUES BASKET CLUB - 1;SCBA SENIOR M1",
            &ClubProfile::default(),
            TODAY,
        );

        assert_eq!(
            report.fixtures[0].location,
            "Plaine Sportive, Chemin de Lucette, 84700 Sorgues"
        );
    }

    #[test]
    fn picks_block_parser_for_copied_tables() {
        let report = parse_fixtures("J3\n9 nov. 20h00\nExtérieur\nRODEZ", &ClubProfile::default(), TODAY);

        assert_eq!(report.fixtures.len(), 1);
        assert!(report.fixtures[0].location.contains("Rodez"));
    }

    #[test]
    fn duplicates_are_counted_and_dropped() {
        let text = "14/12/2024;15:00;SCBA U11-1;ROYAT BC\n\
                    14/12/2024;15:00;SCBA U11-1;ROYAT BC\n\
                    14/12/2024;17:00;SCBA U13-1;CEBAZAT\n";
        let report = parse_fixtures(text, &ClubProfile::default(), TODAY);

        let existing = vec![Game {
            id: GameId(1),
            fixture: report.fixtures[2].clone(),
            roles: vec![],
            carpool: vec![],
        }];

        let report = report.without_duplicates(&existing);

        assert_eq!(report.duplicates, 2);
        assert_eq!(report.fixtures.len(), 1);
        assert_eq!(report.fixtures[0].opponent, "ROYAT BC");
    }

    #[test_log::test(tokio::test)]
    async fn fixture_file_without_games_is_an_error() {
        let path = std::env::temp_dir().join(format!("fixtures-{}.csv", nanoid::nanoid!(6)));
        tokio::fs::write(&path, "Date;Heure;Domicile;Visiteur;Salle\n")
            .await
            .unwrap();

        let result = super::load_fixture_file(&path, &ClubProfile::default(), TODAY).await;
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(matches!(result, Err(super::ImportError::NothingParsed(0))));
    }
}
