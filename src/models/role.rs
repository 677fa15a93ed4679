use std::{fmt::Display, num::NonZeroU32};

use serde::{Deserialize, Serialize};

/// Staffing target used for unlimited roles when computing how complete a roster is.
pub const UNLIMITED_TARGET: usize = 2;

/// Role id, stable within a game but not unique across games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub u32);

impl Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored as a number, or `null` for unlimited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Capacity {
    Limited(NonZeroU32),
    Unlimited,
}

impl Capacity {
    /// Zero means unlimited, like in the admin form.
    pub fn from_slots(slots: u32) -> Capacity {
        match NonZeroU32::new(slots) {
            Some(slots) => Capacity::Limited(slots),
            None => Capacity::Unlimited,
        }
    }

    pub fn effective(&self) -> usize {
        match self {
            Capacity::Limited(slots) => slots.get() as usize,
            Capacity::Unlimited => UNLIMITED_TARGET,
        }
    }
}

impl Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capacity::Limited(slots) => write!(f, "{slots}"),
            Capacity::Unlimited => f.write_str("illimité"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub capacity: Capacity,
    /// Free text display names, duplicates allowed.
    #[serde(default)]
    pub volunteers: Vec<String>,
}

impl Role {
    pub fn new(id: RoleId, name: impl Into<String>, capacity: Capacity) -> Role {
        Role {
            id,
            name: name.into(),
            capacity,
            volunteers: Vec::new(),
        }
    }

    /// Sign-up gate. Unlimited roles are never full.
    pub fn is_full(&self) -> bool {
        match self.capacity {
            Capacity::Limited(slots) => self.volunteers.len() >= slots.get() as usize,
            Capacity::Unlimited => false,
        }
    }

    /// Whether the role reached its staffing target, unlimited roles counting as 2.
    pub fn is_complete(&self) -> bool {
        self.volunteers.len() >= self.capacity.effective()
    }

    /// Slots filled, clamped so an overbooked role never counts more than its target.
    pub fn filled(&self) -> usize {
        self.volunteers.len().min(self.capacity.effective())
    }

    /// Whether adding `extra` volunteers keeps the role within a limited capacity.
    pub fn has_room_for(&self, extra: usize) -> bool {
        match self.capacity {
            Capacity::Limited(slots) => self.volunteers.len() + extra <= slots.get() as usize,
            Capacity::Unlimited => true,
        }
    }

    /// Matches a role by id (`"2"`) or by case-insensitive name (`"chrono"`).
    pub fn matches(&self, id_or_name: &str) -> bool {
        let id_or_name = id_or_name.trim();
        id_or_name == self.id.0.to_string() || self.name.to_lowercase() == id_or_name.to_lowercase()
    }
}

struct RoleTemplate {
    name: &'static str,
    slots: u32,
    youth_only: bool,
}

const DEFAULT_ROLES: &[RoleTemplate] = &[
    RoleTemplate {
        name: "Buvette",
        slots: 2,
        youth_only: false,
    },
    RoleTemplate {
        name: "Chrono",
        slots: 1,
        youth_only: false,
    },
    RoleTemplate {
        name: "Table de marque",
        slots: 1,
        youth_only: false,
    },
    RoleTemplate {
        name: "Goûter",
        slots: 0,
        youth_only: true,
    },
];

pub fn is_senior_team(team: &str) -> bool {
    team.trim().to_uppercase().starts_with("SENIOR")
}

/// Roles created with a new game. Senior teams get no snack role.
pub fn default_roles_for(team: &str) -> Vec<Role> {
    let senior = is_senior_team(team);

    DEFAULT_ROLES
        .iter()
        .filter(|template| !(template.youth_only && senior))
        .enumerate()
        .map(|(index, template)| {
            Role::new(
                RoleId(index as u32 + 1),
                template.name,
                Capacity::from_slots(template.slots),
            )
        })
        .collect()
}
