use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Game, GameId, NewRegistration, RegistrationId, UserRegistration};

/// A game as read, with the version its commit must match.
#[derive(Clone, Debug)]
pub struct VersionedGame {
    pub game: Game,
    pub version: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexWrite {
    Insert(NewRegistration),
    Delete(RegistrationId),
    Rename {
        id: RegistrationId,
        volunteer_name: String,
    },
}

/// New game document plus the registration index writes, applied together or not at all.
#[derive(Clone, Debug)]
pub struct GameCommit {
    pub game: Game,
    pub expected_version: i64,
    pub index_writes: Vec<IndexWrite>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// Someone else wrote the game since it was read. Nothing was applied.
    Conflict,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Stored data is invalid: {0}")]
    Conversion(#[from] crate::repository::DBFromConversionError),
    #[error("Could not prepare data for storage: {0}")]
    Serialization(#[from] crate::repository::DBToConversionError),
}

#[async_trait]
pub trait GameStore: Send + Sync {
    async fn load_game(&self, id: GameId) -> Result<Option<VersionedGame>, StoreError>;

    /// Registrations of every member on the game.
    async fn load_registrations(&self, game: GameId) -> Result<Vec<UserRegistration>, StoreError>;

    async fn commit(&self, commit: GameCommit) -> Result<CommitOutcome, StoreError>;
}
