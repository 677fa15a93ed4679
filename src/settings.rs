use chrono::{Offset, TimeZone};
use chrono_tz::Tz;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::{import::ClubProfile, models::types::UtcDateTime};

/// Club-wide behaviour, read once at startup.
#[derive(Clone, Debug)]
pub struct ClubSettings {
    /// Zone of the club's wall clock. Game times are stored as local times.
    pub time_zone: Tz,
    /// Reject sign-ups that would overbook a role instead of accepting them.
    pub strict_capacity: bool,
    pub profile: ClubProfile,
    /// Local hour of the daily cleanup.
    pub cleanup_hour: u8,
}

impl Default for ClubSettings {
    fn default() -> Self {
        ClubSettings {
            time_zone: chrono_tz::Europe::Paris,
            strict_capacity: false,
            profile: ClubProfile::default(),
            cleanup_hour: 2,
        }
    }
}

impl ClubSettings {
    /// Offset of the club's zone at an instant. Follows daylight saving time.
    pub fn offset_at(&self, instant: OffsetDateTime) -> UtcOffset {
        let seconds = chrono::DateTime::from_timestamp(instant.unix_timestamp(), 0)
            .map(|utc| {
                self.time_zone
                    .offset_from_utc_datetime(&utc.naive_utc())
                    .fix()
                    .local_minus_utc()
            })
            .unwrap_or(0);

        UtcOffset::from_whole_seconds(seconds).unwrap_or(UtcOffset::UTC)
    }

    pub fn now_local(&self) -> PrimitiveDateTime {
        let now = UtcDateTime::now();
        now.to_local(self.offset_at(now.into()))
    }

    pub fn today(&self) -> Date {
        self.now_local().date()
    }

    /// A club-local wall clock time as an absolute instant.
    ///
    /// Times skipped or repeated by a clock change resolve to the offset in force
    /// just before the change.
    pub fn to_instant(&self, local: PrimitiveDateTime) -> OffsetDateTime {
        let guess = self.offset_at(local.assume_utc());
        let offset = self.offset_at(local.assume_offset(guess));
        local.assume_offset(offset)
    }
}
