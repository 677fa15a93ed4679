use std::fmt::Display;

use time::{Date, PrimitiveDateTime, Time};

use crate::utils::french_dates::parse_time_label;

use super::{CarpoolEntry, Role, RoleId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(pub u64);

impl Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the federation publishes about a game: who, when, where.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fixture {
    pub team: String,
    pub opponent: String,
    /// Display date, e.g. `Samedi 14 Décembre 2024`.
    pub date_label: String,
    /// Missing on games created before ISO dates were stored.
    pub date: Option<Date>,
    /// Display time, e.g. `15H00`.
    pub time_label: String,
    pub location: String,
    pub is_home: bool,
}

impl Fixture {
    pub fn kickoff_time(&self) -> Time {
        parse_time_label(&self.time_label).unwrap_or(Time::MIDNIGHT)
    }

    /// Kickoff in club local time, when the ISO date is known.
    pub fn kickoff(&self) -> Option<PrimitiveDateTime> {
        self.date
            .map(|date| PrimitiveDateTime::new(date, self.kickoff_time()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub fixture: Fixture,
    /// Display order is insertion order.
    pub roles: Vec<Role>,
    pub carpool: Vec<CarpoolEntry>,
}

impl Game {
    pub fn role(&self, role_id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == role_id)
    }

    pub fn role_mut(&mut self, role_id: RoleId) -> Option<&mut Role> {
        self.roles.iter_mut().find(|role| role.id == role_id)
    }

    pub fn find_role(&self, id_or_name: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.matches(id_or_name))
    }

    /// Case-insensitive match against volunteers of any role and carpool entries.
    pub fn involves_name(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return false;
        }

        let is_volunteer = self
            .roles
            .iter()
            .flat_map(|role| role.volunteers.iter())
            .any(|volunteer| volunteer.to_lowercase() == name);
        let is_carpooling = self
            .carpool
            .iter()
            .any(|entry| entry.name.to_lowercase() == name);

        is_volunteer || is_carpooling
    }
}

#[derive(Clone, Debug)]
pub struct NewGame {
    pub fixture: Fixture,
    pub roles: Vec<Role>,
}

impl NewGame {
    /// A game with the club's default role template for its team.
    pub fn with_default_roles(fixture: Fixture) -> NewGame {
        let roles = super::default_roles_for(&fixture.team);
        NewGame { fixture, roles }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use crate::models::{CarpoolEntry, CarpoolEntryId, CarpoolKind, CarpoolStatus};

    use super::{Fixture, Game, GameId, NewGame};

    fn fixture(time_label: &str) -> Fixture {
        Fixture {
            team: "U11 M1".to_string(),
            opponent: "ROYAT BC".to_string(),
            date_label: "Samedi 14 Décembre 2024".to_string(),
            date: Some(date!(2024 - 12 - 14)),
            time_label: time_label.to_string(),
            location: "Maison des Sports".to_string(),
            is_home: true,
        }
    }

    #[test]
    fn kickoff_combines_date_and_time() {
        assert_eq!(fixture("15H00").kickoff(), Some(datetime!(2024-12-14 15:00)));
        assert_eq!(fixture("9h30").kickoff(), Some(datetime!(2024-12-14 09:30)));
    }

    #[test]
    fn unreadable_time_is_midnight() {
        assert_eq!(fixture("TBD").kickoff(), Some(datetime!(2024-12-14 00:00)));
    }

    #[test]
    fn involves_name_checks_roles_and_carpool() {
        let mut game = Game {
            id: GameId(1),
            fixture: fixture("15H00"),
            roles: NewGame::with_default_roles(fixture("15H00")).roles,
            carpool: vec![],
        };
        game.roles[0].volunteers.push("Marie".to_string());
        game.carpool.push(CarpoolEntry {
            id: CarpoolEntryId("c1".to_string()),
            name: "Paul".to_string(),
            owner: None,
            kind: CarpoolKind::Driver,
            phone: None,
            seats: 3,
            departure: None,
            status: CarpoolStatus::Available,
            requested_driver: None,
            matched_with: vec![],
        });

        assert!(game.involves_name("marie"));
        assert!(game.involves_name("PAUL"));
        assert!(!game.involves_name("Léo"));
        assert!(!game.involves_name("  "));
    }
}
