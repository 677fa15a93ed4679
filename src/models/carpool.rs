use std::fmt::Display;

use poise::{serenity_prelude::UserId, ChoiceParameter};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarpoolEntryId(pub String);

impl CarpoolEntryId {
    pub fn generate() -> CarpoolEntryId {
        CarpoolEntryId(nanoid::nanoid!(10))
    }
}

impl Display for CarpoolEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ChoiceParameter)]
#[serde(rename_all = "lowercase")]
pub enum CarpoolKind {
    #[name = "Conducteur"]
    Driver,
    #[name = "Passager"]
    Passenger,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarpoolStatus {
    #[default]
    Available,
    Pending,
    Matched,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarpoolEntry {
    pub id: CarpoolEntryId,
    pub name: String,
    /// Discord member who posted the entry, if any.
    #[serde(default)]
    pub owner: Option<UserId>,
    #[serde(rename = "type")]
    pub kind: CarpoolKind,
    #[serde(default)]
    pub phone: Option<String>,
    /// Seats offered by a driver, or seats needed by a passenger.
    pub seats: u32,
    /// Drivers only.
    #[serde(default)]
    pub departure: Option<String>,
    #[serde(default)]
    pub status: CarpoolStatus,
    #[serde(default)]
    pub requested_driver: Option<CarpoolEntryId>,
    /// Passengers of a driver, or the driver of a matched passenger.
    #[serde(default)]
    pub matched_with: Vec<CarpoolEntryId>,
}

impl CarpoolEntry {
    /// Posted by this member, or carrying their display name.
    pub fn is_owned_by(&self, user: UserId, display_name: &str) -> bool {
        self.owner == Some(user) || self.name.to_lowercase() == display_name.trim().to_lowercase()
    }
}

#[derive(Clone, Debug)]
pub struct NewCarpoolEntry {
    pub name: String,
    pub owner: Option<UserId>,
    pub kind: CarpoolKind,
    pub phone: Option<String>,
    pub seats: u32,
    pub departure: Option<String>,
}

impl NewCarpoolEntry {
    pub fn into_entry(self, id: CarpoolEntryId) -> CarpoolEntry {
        let departure = match self.kind {
            CarpoolKind::Driver => self.departure,
            CarpoolKind::Passenger => None,
        };

        CarpoolEntry {
            id,
            name: self.name,
            owner: self.owner,
            kind: self.kind,
            phone: self.phone,
            seats: self.seats.max(1),
            departure,
            status: CarpoolStatus::Available,
            requested_driver: None,
            matched_with: Vec::new(),
        }
    }
}
