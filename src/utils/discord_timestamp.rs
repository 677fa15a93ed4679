use std::fmt::Display;

use time::OffsetDateTime;

/// Discord renders these in each reader's own timezone and language.
#[derive(Clone, Copy, Debug)]
pub enum TimestampStyle {
    /// Short time, e.g. `16:20`
    ShortTime,
    /// Short date/time, e.g. `20 avril 2021 16:20`
    ShortDateTime,
    /// Relative time, e.g. `dans 2 jours`
    RelativeTime,
}

impl Display for TimestampStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

impl TimestampStyle {
    pub fn suffix(&self) -> &'static str {
        use TimestampStyle::*;

        match self {
            ShortTime => "t",
            ShortDateTime => "f",
            RelativeTime => "R",
        }
    }
}

pub fn timestamp(datetime: OffsetDateTime, style: TimestampStyle) -> String {
    let unix_timestamp = datetime.unix_timestamp();
    format!("<t:{unix_timestamp}:{style}>")
}
