use time::{Duration, PrimitiveDateTime};

use crate::models::{CarpoolKind, Game, GameId};

/// Kickoffs closer than this make an understaffed home game urgent.
pub const URGENCY_WINDOW: Duration = Duration::hours(48);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occupancy {
    pub filled: usize,
    pub target: usize,
    /// Rounded, 0 for a game without roles.
    pub percent: u8,
    pub fully_staffed: bool,
}

fn percent(filled: usize, target: usize) -> u8 {
    if target == 0 {
        return 0;
    }
    (100.0 * filled as f64 / target as f64).round() as u8
}

/// Staffing of one game. Unlimited roles count as 2 slots and overbooked roles are
/// clamped to their target.
pub fn compute_occupancy(game: &Game) -> Occupancy {
    let filled = game.roles.iter().map(|role| role.filled()).sum();
    let target = game.roles.iter().map(|role| role.capacity.effective()).sum();

    Occupancy {
        filled,
        target,
        percent: percent(filled, target),
        fully_staffed: game.roles.iter().all(|role| role.is_complete()),
    }
}

/// Names of the roles still short of volunteers.
pub fn missing_roles(game: &Game) -> Vec<&str> {
    game.roles
        .iter()
        .filter(|role| !role.is_complete())
        .map(|role| role.name.as_str())
        .collect()
}

/// Home game, not fully staffed, kicking off within the next 48 hours.
pub fn is_urgent(game: &Game, now_local: PrimitiveDateTime) -> bool {
    if !game.fixture.is_home || compute_occupancy(game).fully_staffed {
        return false;
    }

    match game.fixture.kickoff() {
        Some(kickoff) => {
            let until_kickoff = kickoff - now_local;
            until_kickoff > Duration::ZERO && until_kickoff < URGENCY_WINDOW
        }
        None => false,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CarpoolSummary {
    pub drivers: usize,
    pub passengers: usize,
    pub seats_offered: u32,
    pub seats_requested: u32,
}

impl CarpoolSummary {
    /// Seats offered minus seats requested. Negative when drivers are missing.
    pub fn balance(&self) -> i64 {
        i64::from(self.seats_offered) - i64::from(self.seats_requested)
    }
}

pub fn carpool_summary(game: &Game) -> CarpoolSummary {
    game.carpool
        .iter()
        .fold(CarpoolSummary::default(), |mut summary, entry| {
            match entry.kind {
                CarpoolKind::Driver => {
                    summary.drivers += 1;
                    summary.seats_offered += entry.seats;
                }
                CarpoolKind::Passenger => {
                    summary.passengers += 1;
                    summary.seats_requested += entry.seats;
                }
            }
            summary
        })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameStats {
    pub id: GameId,
    pub label: String,
    pub occupancy: Occupancy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterStats {
    pub home_games: usize,
    pub filled: usize,
    pub target: usize,
    pub percent: u8,
    /// Least staffed first.
    pub games: Vec<GameStats>,
}

/// Club-wide staffing over home games.
pub fn roster_stats(games: &[Game]) -> RosterStats {
    let mut stats = games
        .iter()
        .filter(|game| game.fixture.is_home)
        .map(|game| GameStats {
            id: game.id,
            label: format!(
                "{} vs {} ({})",
                game.fixture.team, game.fixture.opponent, game.fixture.date_label
            ),
            occupancy: compute_occupancy(game),
        })
        .collect::<Vec<_>>();

    stats.sort_by_key(|game| game.occupancy.percent);

    let filled = stats.iter().map(|game| game.occupancy.filled).sum();
    let target = stats.iter().map(|game| game.occupancy.target).sum();

    RosterStats {
        home_games: stats.len(),
        filled,
        target,
        percent: percent(filled, target),
        games: stats,
    }
}

#[cfg(test)]
mod tests {
    use time::{
        macros::{date, datetime},
        Duration,
    };

    use crate::models::{
        default_roles_for, Capacity, CarpoolEntry, CarpoolEntryId, CarpoolKind, CarpoolStatus,
        Fixture, Game, GameId, Role, RoleId,
    };

    use super::{carpool_summary, compute_occupancy, is_urgent, missing_roles, roster_stats};

    fn home_game(id: u64) -> Game {
        Game {
            id: GameId(id),
            fixture: Fixture {
                team: "U11 M1".to_string(),
                opponent: "ROYAT BC".to_string(),
                date_label: "Samedi 14 Décembre 2024".to_string(),
                date: Some(date!(2024 - 12 - 14)),
                time_label: "15H00".to_string(),
                location: "Maison des Sports".to_string(),
                is_home: true,
            },
            roles: default_roles_for("U11 M1"),
            carpool: vec![],
        }
    }

    fn staff(game: &mut Game, role: usize, names: &[&str]) {
        game.roles[role]
            .volunteers
            .extend(names.iter().map(|name| name.to_string()));
    }

    fn carpool(kind: CarpoolKind, seats: u32) -> CarpoolEntry {
        CarpoolEntry {
            id: CarpoolEntryId::generate(),
            name: "Paul".to_string(),
            owner: None,
            kind,
            phone: None,
            seats,
            departure: None,
            status: CarpoolStatus::Available,
            requested_driver: None,
            matched_with: vec![],
        }
    }

    #[test]
    fn overbooked_roles_never_exceed_their_target() {
        let mut game = home_game(1);
        game.roles = vec![Role::new(RoleId(1), "Chrono", Capacity::from_slots(1))];
        staff(&mut game, 0, &["A", "B", "C"]);

        let occupancy = compute_occupancy(&game);

        assert_eq!(occupancy.filled, 1);
        assert_eq!(occupancy.target, 1);
        assert_eq!(occupancy.percent, 100);
    }

    #[test]
    fn unlimited_roles_count_as_two() {
        let mut game = home_game(1);
        // Buvette 2, Chrono 1, Table 1, Goûter unlimited (2): target 6.
        staff(&mut game, 0, &["A", "B"]);
        staff(&mut game, 3, &["C"]);

        let occupancy = compute_occupancy(&game);

        assert_eq!(occupancy.target, 6);
        assert_eq!(occupancy.filled, 3);
        assert_eq!(occupancy.percent, 50);
        assert!(!occupancy.fully_staffed);
        assert_eq!(missing_roles(&game), vec!["Chrono", "Table de marque", "Goûter"]);
    }

    #[test]
    fn percent_is_rounded() {
        let mut game = home_game(1);
        game.roles = vec![Role::new(RoleId(1), "Buvette", Capacity::from_slots(3))];
        staff(&mut game, 0, &["A", "B"]);

        assert_eq!(compute_occupancy(&game).percent, 67);
    }

    #[test]
    fn urgency_window_boundaries() {
        let game = home_game(1);
        let kickoff = datetime!(2024-12-14 15:00);

        assert!(!is_urgent(&game, kickoff - Duration::hours(48) - Duration::minutes(1)));
        assert!(is_urgent(&game, kickoff - Duration::hours(47) - Duration::minutes(59)));
        assert!(is_urgent(&game, kickoff - Duration::minutes(1)));
        assert!(!is_urgent(&game, kickoff));
        assert!(!is_urgent(&game, kickoff + Duration::hours(1)));
    }

    #[test]
    fn staffed_or_away_games_are_not_urgent() {
        let now = datetime!(2024-12-14 10:00);

        let mut staffed = home_game(1);
        for role in staffed.roles.iter_mut() {
            let target = role.capacity.effective();
            role.volunteers = (0..target).map(|n| format!("V{n}")).collect();
        }
        assert!(!is_urgent(&staffed, now));

        let mut away = home_game(2);
        away.fixture.is_home = false;
        assert!(!is_urgent(&away, now));

        let mut undated = home_game(3);
        undated.fixture.date = None;
        assert!(!is_urgent(&undated, now));
    }

    #[test]
    fn carpool_balance() {
        let mut game = home_game(1);
        game.carpool = vec![
            carpool(CarpoolKind::Driver, 3),
            carpool(CarpoolKind::Passenger, 2),
            carpool(CarpoolKind::Passenger, 2),
        ];

        let summary = carpool_summary(&game);

        assert_eq!(summary.drivers, 1);
        assert_eq!(summary.passengers, 2);
        assert_eq!(summary.balance(), -1);
    }

    #[test]
    fn stats_cover_home_games_least_staffed_first() {
        let mut full = home_game(1);
        for role in full.roles.iter_mut() {
            let target = role.capacity.effective();
            role.volunteers = (0..target).map(|n| format!("V{n}")).collect();
        }
        let empty = home_game(2);
        let mut away = home_game(3);
        away.fixture.is_home = false;

        let stats = roster_stats(&[full, empty, away]);

        assert_eq!(stats.home_games, 2);
        assert_eq!(stats.filled, 6);
        assert_eq!(stats.target, 12);
        assert_eq!(stats.percent, 50);
        assert_eq!(
            stats.games.iter().map(|game| game.id).collect::<Vec<_>>(),
            vec![GameId(2), GameId(1)]
        );
    }
}
