use lazy_regex::regex;

use crate::{
    models::{Fixture, Game},
    utils::french_dates::fold,
};

fn normalize(text: &str) -> String {
    regex!(r"\s+").replace_all(fold(text).trim(), " ").into_owned()
}

/// Same kickoff, same team, and opponent names where one contains the other
/// (federation spellings vary).
pub fn is_duplicate(fixture: &Fixture, existing: &[Game]) -> bool {
    existing.iter().any(|game| {
        let other = &game.fixture;

        if other.date != fixture.date || other.time_label != fixture.time_label {
            return false;
        }

        let same_team = normalize(&other.team) == normalize(&fixture.team);

        let existing_opponent = normalize(&other.opponent);
        let new_opponent = normalize(&fixture.opponent);
        let same_opponent = existing_opponent.contains(&new_opponent)
            || new_opponent.contains(&existing_opponent);

        same_team && same_opponent
    })
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::models::{Fixture, Game, GameId};

    use super::is_duplicate;

    fn fixture(team: &str, opponent: &str, time_label: &str) -> Fixture {
        Fixture {
            team: team.to_string(),
            opponent: opponent.to_string(),
            date_label: "Samedi 14 Décembre 2024".to_string(),
            date: Some(date!(2024 - 12 - 14)),
            time_label: time_label.to_string(),
            location: "Maison des Sports".to_string(),
            is_home: true,
        }
    }

    fn existing() -> Vec<Game> {
        vec![Game {
            id: GameId(1),
            fixture: fixture("U11 M1", "ROYAT BASKET CLUB", "15H00"),
            roles: vec![],
            carpool: vec![],
        }]
    }

    #[test]
    fn opponent_spelling_may_vary() {
        assert!(is_duplicate(&fixture("u11  m1", "Royat", "15H00"), &existing()));
        assert!(is_duplicate(
            &fixture("U11 M1", "ROYAT BASKET CLUB (63)", "15H00"),
            &existing()
        ));
    }

    #[test]
    fn other_kickoff_or_team_is_new() {
        assert!(!is_duplicate(&fixture("U11 M1", "ROYAT", "17H00"), &existing()));
        assert!(!is_duplicate(&fixture("U11 M2", "ROYAT", "15H00"), &existing()));
        assert!(!is_duplicate(&fixture("U11 M1", "CEBAZAT", "15H00"), &existing()));
    }
}
