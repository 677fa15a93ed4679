use poise::{serenity_prelude::UserId, ChoiceParameter};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use super::types::UtcDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnnouncementId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, EnumIter, ChoiceParameter)]
#[strum(serialize_all = "lowercase")]
pub enum AnnouncementKind {
    #[name = "Information"]
    Info,
    #[name = "Attention"]
    Warning,
    #[name = "Urgent"]
    Urgent,
}

impl AnnouncementKind {
    pub fn from_db_name(name: &str) -> Option<AnnouncementKind> {
        AnnouncementKind::iter().find(|kind| kind.as_ref() == name)
    }

    /// Higher is shown first.
    pub fn priority(&self) -> u8 {
        match self {
            AnnouncementKind::Info => 1,
            AnnouncementKind::Warning => 2,
            AnnouncementKind::Urgent => 3,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            AnnouncementKind::Info => "ℹ️",
            AnnouncementKind::Warning => "⚠️",
            AnnouncementKind::Urgent => "🚨",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, AsRefStr, EnumIter, ChoiceParameter)]
#[strum(serialize_all = "lowercase")]
pub enum AnnouncementTarget {
    #[default]
    #[name = "Tout le monde"]
    All,
    #[name = "Bénévoles"]
    Volunteers,
    #[name = "Administrateurs"]
    Admins,
}

impl AnnouncementTarget {
    pub fn from_db_name(name: &str) -> Option<AnnouncementTarget> {
        AnnouncementTarget::iter().find(|target| target.as_ref() == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub message: String,
    pub kind: AnnouncementKind,
    pub active: bool,
    pub created_at: UtcDateTime,
    pub expires_at: UtcDateTime,
    pub created_by: UserId,
    pub target: AnnouncementTarget,
}

impl Announcement {
    pub fn is_visible(&self, now: UtcDateTime) -> bool {
        self.active && self.expires_at > now
    }
}

#[derive(Clone, Debug)]
pub struct NewAnnouncement {
    pub message: String,
    pub kind: AnnouncementKind,
    pub created_at: UtcDateTime,
    pub expires_at: UtcDateTime,
    pub created_by: UserId,
    pub target: AnnouncementTarget,
}

/// Urgent first, then warnings, then information; newest first within a kind.
pub fn sort_for_display(announcements: &mut [Announcement]) {
    announcements.sort_by(|a, b| {
        b.kind
            .priority()
            .cmp(&a.kind.priority())
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
