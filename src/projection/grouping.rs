use time::{Date, Duration};

use crate::{
    models::Game,
    utils::french_dates::{month_label, month_name, weekday_name},
};

use super::sort::known_date;

pub const UNKNOWN_DATE_LABEL: &str = "Date inconnue";

/// A run of consecutive games sharing a label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameGroup {
    pub label: String,
    pub games: Vec<Game>,
}

/// One column of the planning view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanningDay {
    pub date: Date,
    pub label: String,
    pub games: Vec<Game>,
}

/// Monday of the week containing `date`.
pub fn week_start(date: Date) -> Date {
    let days_since_monday = (date.weekday().number_days_from_sunday() + 6) % 7;
    date - Duration::days(days_since_monday.into())
}

/// Splits an already sorted list into runs. A label reappearing later starts a new run.
fn group_runs(games: Vec<Game>, label_of: impl Fn(&Game) -> String) -> Vec<GameGroup> {
    let mut groups: Vec<GameGroup> = Vec::new();

    for game in games {
        let label = label_of(&game);
        match groups.last_mut() {
            Some(group) if group.label == label => group.games.push(game),
            _ => groups.push(GameGroup {
                label,
                games: vec![game],
            }),
        }
    }

    groups
}

/// `Décembre 2024`, or `Date inconnue` when neither the ISO date nor the label
/// gives a day.
pub fn group_by_month(games: Vec<Game>, fallback_year: i32) -> Vec<GameGroup> {
    group_runs(games, |game| match known_date(game, fallback_year) {
        Some(date) => month_label(date),
        None => UNKNOWN_DATE_LABEL.to_string(),
    })
}

/// Labels a week relative to the week containing `reference`.
pub fn week_label(week: Date, reference: Date) -> String {
    let current = week_start(reference);

    if week == current {
        "Cette semaine".to_string()
    } else if week == current + Duration::weeks(1) {
        "Semaine prochaine".to_string()
    } else if week == current - Duration::weeks(1) {
        "Semaine dernière".to_string()
    } else {
        let sunday = week + Duration::days(6);
        format!(
            "Semaine du {} {} au {} {}",
            week.day(),
            month_name(week.month()),
            sunday.day(),
            month_name(sunday.month())
        )
    }
}

pub fn group_by_week(games: Vec<Game>, reference: Date) -> Vec<GameGroup> {
    group_runs(games, |game| match known_date(game, reference.year()) {
        Some(date) => week_label(week_start(date), reference),
        None => UNKNOWN_DATE_LABEL.to_string(),
    })
}

/// Seven columns from the Monday of `reference`'s week. Games with no known date are left out.
pub fn planning_week(games: &[Game], reference: Date) -> Vec<PlanningDay> {
    let monday = week_start(reference);

    (0..7)
        .map(|offset| {
            let date = monday + Duration::days(offset);
            PlanningDay {
                date,
                label: format!("{} {}", weekday_name(date.weekday()), date.day()),
                games: games
                    .iter()
                    .filter(|game| known_date(game, reference.year()) == Some(date))
                    .cloned()
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use time::{macros::date, Date};

    use crate::models::{Fixture, Game, GameId};

    use super::{group_by_month, group_by_week, planning_week, week_label, week_start};

    fn game(id: u64, date: Option<Date>) -> Game {
        Game {
            id: GameId(id),
            fixture: Fixture {
                team: "U13 M1".to_string(),
                opponent: "ROYAT BC".to_string(),
                date_label: String::new(),
                date,
                time_label: "15H00".to_string(),
                location: "Maison des Sports".to_string(),
                is_home: true,
            },
            roles: vec![],
            carpool: vec![],
        }
    }

    fn summary(groups: &[super::GameGroup]) -> Vec<(String, Vec<u64>)> {
        groups
            .iter()
            .map(|group| {
                (
                    group.label.clone(),
                    group.games.iter().map(|game| game.id.0).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn week_starts_on_monday() {
        // 2024-12-16 is a Monday.
        assert_eq!(week_start(date!(2024 - 12 - 16)), date!(2024 - 12 - 16));
        assert_eq!(week_start(date!(2024 - 12 - 18)), date!(2024 - 12 - 16));
        assert_eq!(week_start(date!(2024 - 12 - 22)), date!(2024 - 12 - 16));
        assert_eq!(week_start(date!(2024 - 12 - 23)), date!(2024 - 12 - 23));
    }

    #[test]
    fn months_group_contiguous_runs() {
        let games = vec![
            game(1, Some(date!(2024 - 11 - 30))),
            game(2, Some(date!(2024 - 12 - 07))),
            game(3, Some(date!(2024 - 12 - 14))),
            game(4, None),
        ];

        assert_eq!(
            summary(&group_by_month(games, 2024)),
            vec![
                ("Novembre 2024".to_string(), vec![1]),
                ("Décembre 2024".to_string(), vec![2, 3]),
                ("Date inconnue".to_string(), vec![4]),
            ]
        );
    }

    #[test]
    fn label_only_games_join_their_month() {
        let mut label_only = game(2, None);
        label_only.fixture.date_label = "Samedi 14 Décembre 2024".to_string();
        let mut unknown = game(4, None);
        unknown.fixture.date_label = "à définir".to_string();

        let games = vec![
            game(1, Some(date!(2024 - 12 - 07))),
            label_only,
            game(3, Some(date!(2024 - 12 - 21))),
            unknown,
        ];

        assert_eq!(
            summary(&group_by_month(games, 2024)),
            vec![
                ("Décembre 2024".to_string(), vec![1, 2, 3]),
                ("Date inconnue".to_string(), vec![4]),
            ]
        );
    }

    #[test]
    fn weeks_are_labelled_relative_to_reference() {
        let reference = date!(2024 - 12 - 18);
        let games = vec![
            game(1, Some(date!(2024 - 12 - 14))),
            game(2, Some(date!(2024 - 12 - 21))),
            game(3, Some(date!(2024 - 12 - 22))),
            game(4, Some(date!(2024 - 12 - 28))),
            game(5, Some(date!(2025 - 01 - 11))),
        ];

        assert_eq!(
            summary(&group_by_week(games, reference)),
            vec![
                ("Semaine dernière".to_string(), vec![1]),
                ("Cette semaine".to_string(), vec![2, 3]),
                ("Semaine prochaine".to_string(), vec![4]),
                ("Semaine du 6 Janvier au 12 Janvier".to_string(), vec![5]),
            ]
        );
    }

    #[test]
    fn distant_week_label_spans_months() {
        assert_eq!(
            week_label(date!(2024 - 12 - 30), date!(2024 - 11 - 01)),
            "Semaine du 30 Décembre au 5 Janvier"
        );
    }

    #[test]
    fn planning_has_seven_days() {
        let games = vec![
            game(1, Some(date!(2024 - 12 - 14))),
            game(2, Some(date!(2024 - 12 - 15))),
            game(3, Some(date!(2024 - 12 - 14))),
            game(4, Some(date!(2024 - 12 - 16))),
        ];

        let week = planning_week(&games, date!(2024 - 12 - 12));

        assert_eq!(week.len(), 7);
        assert_eq!(week[0].label, "Lundi 9");
        assert_eq!(week[5].label, "Samedi 14");
        assert_eq!(
            week[5].games.iter().map(|g| g.id.0).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(week[6].games.len(), 1);
    }
}
