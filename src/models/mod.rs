mod announcement;
mod carpool;
mod game;
mod registration;
mod role;

pub mod types;

pub use announcement::{
    sort_for_display, Announcement, AnnouncementId, AnnouncementKind, AnnouncementTarget,
    NewAnnouncement,
};
pub use carpool::{CarpoolEntry, CarpoolEntryId, CarpoolKind, CarpoolStatus, NewCarpoolEntry};
pub use game::{Fixture, Game, GameId, NewGame};
pub use registration::{NewRegistration, RegistrationId, UserRegistration};
pub use role::{default_roles_for, is_senior_team, Capacity, Role, RoleId, UNLIMITED_TARGET};
