pub mod calendar;
mod discord_timestamp;
pub mod formatting;
pub mod french_dates;

pub use discord_timestamp::{timestamp, TimestampStyle};
