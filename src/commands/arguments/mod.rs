use super::CommandError;

mod game_ref;
mod human_kickoff;
mod trimmed_string;

pub use game_ref::GameRef;
pub use human_kickoff::HumanKickoff;
pub use trimmed_string::TrimmedString;

pub fn invalid_argument(message: String) -> CommandError {
    CommandError::InvalidArgument { message }
}
