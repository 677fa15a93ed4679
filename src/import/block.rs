use lazy_regex::{regex_captures, regex_is_match};
use time::Date;

use crate::{
    models::Fixture,
    utils::french_dates::{fold, format_date_label, format_time_label, parse_time_label},
};

use super::{
    delimited::parse_import_date,
    team::{default_home_venue, ClubProfile, AWAY_VENUE},
    ImportReport,
};

/// Whether the text was copied from the federation's "upcoming games" table:
/// game numbers (`#123`) and round numbers (`J12`) on their own lines.
pub fn looks_like_blocks(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .any(|line| line.starts_with('#') || regex_is_match!(r"^J\d+", line))
}

#[derive(Default)]
struct PartialGame {
    date: Option<Date>,
    time_label: Option<String>,
    side: Option<bool>,
}

/// Blocks of lines: `#123`, `J12`, `10 janv. 20h00`, `Domicile` or `Extérieur`, scores,
/// then the opponent. The club's team is the profile's default team.
pub fn parse_blocks(text: &str, profile: &ClubProfile, today: Date) -> ImportReport {
    let mut report = ImportReport::default();
    let team = profile.normalize_team(&profile.default_team);
    let mut current = PartialGame::default();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if line.starts_with('#') || regex_is_match!(r"^J\d+$", line) {
            continue;
        }

        if let Some((_, date, time)) =
            regex_captures!(r"(?i)(\d{1,2}\s+[a-zéû]+\.?)\s+(\d{1,2}[h:]\d{2})", line)
        {
            current = PartialGame::default();
            if let Some(date) = parse_import_date(date, today) {
                current.date = Some(date);
                current.time_label = Some(
                    parse_time_label(time)
                        .map(format_time_label)
                        .unwrap_or_else(|| time.to_uppercase()),
                );
                continue;
            }
        }

        match fold(line).as_str() {
            "domicile" => {
                current.side = Some(true);
                continue;
            }
            "exterieur" => {
                current.side = Some(false);
                continue;
            }
            _ => {}
        }

        let (Some(date), Some(is_home)) = (current.date, current.side) else {
            continue;
        };

        // Scores and placeholders between the side and the opponent.
        if line == "-" || regex_is_match!(r"^\d+$", line) {
            continue;
        }

        let location = if is_home {
            default_home_venue(&team)
        } else {
            AWAY_VENUE
        };

        report.fixtures.push(Fixture {
            team: team.clone(),
            opponent: line.to_string(),
            date_label: format_date_label(date),
            date: Some(date),
            time_label: current.time_label.take().unwrap_or_default(),
            location: location.to_string(),
            is_home,
        });
        current = PartialGame::default();
    }

    report
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::import::team::ClubProfile;

    use super::{looks_like_blocks, parse_blocks};

    const TODAY: time::Date = date!(2024 - 11 - 20);

    const COPIED: &str = "#1042\n\
                          J12\n\
                          10 janv. 20h00\n\
                          Domicile\n\
                          0\n\
                          -\n\
                          ROYAT BC\n\
                          #1043\n\
                          J13\n\
                          18 janv. 18:30\n\
                          Extérieur\n\
                          BC LEMPDES\n";

    #[test]
    fn detects_block_text() {
        assert!(looks_like_blocks(COPIED));
        assert!(!looks_like_blocks("14/12/2024;15:00;SCBA U11-1;ROYAT BC"));
    }

    #[test]
    fn parses_home_and_away_blocks() {
        let profile = ClubProfile {
            default_team: "SCBA U13-2".to_string(),
            ..ClubProfile::default()
        };

        let report = parse_blocks(COPIED, &profile, TODAY);

        assert!(report.errors.is_empty());
        assert_eq!(report.fixtures.len(), 2);

        let home = &report.fixtures[0];
        assert_eq!(home.team, "U13 M2");
        assert_eq!(home.date, Some(date!(2025 - 01 - 10)));
        assert_eq!(home.time_label, "20H00");
        assert_eq!(home.opponent, "ROYAT BC");
        assert_eq!(home.location, "Maison des Sports");
        assert!(home.is_home);

        let away = &report.fixtures[1];
        assert_eq!(away.opponent, "BC LEMPDES");
        assert_eq!(away.time_label, "18H30");
        assert_eq!(away.location, "Extérieur");
        assert!(!away.is_home);
    }

    #[test]
    fn senior_first_team_plays_at_fleury() {
        let report = parse_blocks(
            "J1\n5 oct. 20h30\nDomicile\nCEBAZAT",
            &ClubProfile::default(),
            TODAY,
        );

        assert_eq!(report.fixtures[0].location, "Gymnase Fleury");
        assert_eq!(report.fixtures[0].date, Some(date!(2024 - 10 - 05)));
    }

    #[test]
    fn lines_before_a_date_are_ignored() {
        let report = parse_blocks(
            "J1\nCEBAZAT\nDomicile\nROYAT",
            &ClubProfile::default(),
            TODAY,
        );

        assert!(report.fixtures.is_empty());
    }
}
