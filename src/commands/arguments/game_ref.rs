use std::str::FromStr;

use lazy_regex::regex_captures;

use crate::{commands::CommandError, models::GameId};

use super::invalid_argument;

/// A game picked from the autocomplete list (`12 · U11 M1 vs ROYAT BC · …`) or typed
/// as `#12` / `12`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameRef(pub GameId);

impl FromStr for GameRef {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        regex_captures!(r"^\s*#?\s*(\d+)", s)
            .and_then(|(_, id)| id.parse().ok())
            .map(|id| GameRef(GameId(id)))
            .ok_or_else(|| {
                invalid_argument(format!(
                    "Match invalide : `{}`. Choisissez un match dans la liste ou indiquez son numéro, par exemple `#12`.",
                    s.escape_default()
                ))
            })
    }
}

impl From<GameRef> for GameId {
    fn from(value: GameRef) -> Self {
        value.0
    }
}
