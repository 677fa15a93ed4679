mod announcement_repository;
mod conversion;
mod favorite_team_repository;
mod game_repository;
mod registration_repository;
mod system_repository;

pub use announcement_repository::AnnouncementRepository;
pub use conversion::{DBFromConversionError, DBToConversionError};
pub use favorite_team_repository::FavoriteTeamRepository;
pub use game_repository::{GameRepository, GameStorageEvent};
pub use registration_repository::RegistrationRepository;
pub use system_repository::SystemRepository;

#[cfg(test)]
pub async fn test_pool() -> sqlx::Pool<sqlx::Sqlite> {
    // One connection, kept forever: every connection to `sqlite::memory:` is a new database.
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}
