use std::ops::{Add, Sub};

use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// A point in time stored without an offset, always in UTC.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(PrimitiveDateTime);

impl UtcDateTime {
    pub fn assume_utc(datetime: PrimitiveDateTime) -> UtcDateTime {
        UtcDateTime(datetime)
    }

    pub fn now() -> UtcDateTime {
        UtcDateTime::from(OffsetDateTime::now_utc())
    }

    /// Wall clock time at the given offset, e.g. the club's local time.
    pub fn to_local(self, offset: UtcOffset) -> PrimitiveDateTime {
        let local = self.0.assume_utc().to_offset(offset);
        PrimitiveDateTime::new(local.date(), local.time())
    }
}

impl From<OffsetDateTime> for UtcDateTime {
    fn from(value: OffsetDateTime) -> Self {
        let value_utc = value.to_offset(UtcOffset::UTC);
        UtcDateTime(PrimitiveDateTime::new(value_utc.date(), value_utc.time()))
    }
}

impl From<UtcDateTime> for OffsetDateTime {
    fn from(value: UtcDateTime) -> Self {
        value.0.assume_utc()
    }
}

impl Add<Duration> for UtcDateTime {
    type Output = UtcDateTime;

    fn add(self, rhs: Duration) -> Self::Output {
        UtcDateTime(self.0 + rhs)
    }
}

impl Sub<Duration> for UtcDateTime {
    type Output = UtcDateTime;

    fn sub(self, rhs: Duration) -> Self::Output {
        UtcDateTime(self.0 - rhs)
    }
}
