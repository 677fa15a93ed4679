use async_trait::async_trait;
use sqlx::{query, query_as, Pool, Sqlite, SqliteConnection};
use time::Date;
use tokio::sync::broadcast::{Receiver, Sender};
use tracing::{debug, info, warn};

use crate::{
    ledger::{CommitOutcome, GameCommit, GameStore, IndexWrite, StoreError, VersionedGame},
    models::{
        CarpoolEntry, Fixture, Game, GameId, NewGame, NewRegistration, Role, UserRegistration,
    },
    utils::french_dates::parse_french_date,
};

use super::{
    conversion::{DBConvertible, DBFromConversionError},
    registration_repository::registrations_on_game,
};

const INITIALIZED_KEY: &str = "initialized";

#[derive(Debug)]
pub struct GameRepository {
    pool: Pool<Sqlite>,
    events: Sender<GameStorageEvent>,
}

#[derive(Clone, Copy, Debug)]
pub enum GameStorageEvent {
    GamesUpdated,
}

impl GameRepository {
    pub fn new(pool: Pool<Sqlite>) -> GameRepository {
        GameRepository {
            pool,
            events: tokio::sync::broadcast::channel(128).0,
        }
    }

    pub fn subscribe(&self) -> Receiver<GameStorageEvent> {
        self.events.subscribe()
    }

    fn notify(&self) {
        let _ = self.events.send(GameStorageEvent::GamesUpdated); // Don't care if it actually gets received
    }

    #[tracing::instrument(skip(self, new_game), fields(team = %new_game.fixture.team))]
    pub async fn create_game(&self, new_game: &NewGame) -> Result<Game, anyhow::Error> {
        let mut transaction = self.pool.begin().await?;

        let id = insert_game(&mut transaction, new_game).await?;

        transaction.commit().await?;

        self.notify();

        Ok(Game {
            id,
            fixture: new_game.fixture.clone(),
            roles: new_game.roles.clone(),
            carpool: Vec::new(),
        })
    }

    /// Inserts all games or none.
    #[tracing::instrument(skip_all, fields(count = new_games.len()))]
    pub async fn create_games(&self, new_games: &[NewGame]) -> Result<Vec<GameId>, anyhow::Error> {
        let mut transaction = self.pool.begin().await?;

        let mut ids = Vec::with_capacity(new_games.len());
        for new_game in new_games {
            ids.push(insert_game(&mut transaction, new_game).await?);
        }

        transaction.commit().await?;

        if !ids.is_empty() {
            self.notify();
        }

        Ok(ids)
    }

    pub async fn get_game(&self, id: GameId) -> Result<Option<Game>, anyhow::Error> {
        let mut connection = self.pool.acquire().await?;

        Ok(select_game(&mut connection, id)
            .await?
            .map(|versioned| versioned.game))
    }

    /// Every game in insertion order; the projection decides the display order.
    pub async fn list_games(&self) -> Result<Vec<Game>, anyhow::Error> {
        let games = query_as::<_, SqlGame>(r#"SELECT * FROM games ORDER BY id"#)
            .fetch_all(&self.pool)
            .await?;

        games
            .iter()
            .map(|game| Ok(Game::from_row(game)?))
            .collect()
    }

    /// Replaces what is known about the fixture and refreshes the copies kept in
    /// registrations. Roles and carpool are untouched.
    #[tracing::instrument(skip(self, fixture))]
    pub async fn update_fixture(&self, id: GameId, fixture: &Fixture) -> Result<bool, anyhow::Error> {
        let mut transaction = self.pool.begin().await?;

        let game_id = id.to_db()?;
        let date_iso = fixture.date.to_db()?;

        let updated = query(
            r#"
                UPDATE games
                SET team = $1,
                    opponent = $2,
                    date_label = $3,
                    date_iso = $4,
                    time_label = $5,
                    location = $6,
                    is_home = $7,
                    version = version + 1
                WHERE id = $8
            "#,
        )
        .bind(&fixture.team)
        .bind(&fixture.opponent)
        .bind(&fixture.date_label)
        .bind(&date_iso)
        .bind(&fixture.time_label)
        .bind(&fixture.location)
        .bind(fixture.is_home)
        .bind(game_id)
        .execute(&mut *transaction)
        .await?
        .rows_affected();

        if updated == 0 {
            return Ok(false);
        }

        query(
            r#"
                UPDATE user_registrations
                SET team = $1,
                    opponent = $2,
                    game_date_label = $3,
                    game_date_iso = $4,
                    game_time = $5,
                    location = $6
                WHERE game_id = $7
            "#,
        )
        .bind(&fixture.team)
        .bind(&fixture.opponent)
        .bind(&fixture.date_label)
        .bind(&date_iso)
        .bind(&fixture.time_label)
        .bind(&fixture.location)
        .bind(game_id)
        .execute(&mut *transaction)
        .await?;

        transaction.commit().await?;

        self.notify();

        Ok(true)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_game(&self, id: GameId) -> Result<bool, anyhow::Error> {
        let mut transaction = self.pool.begin().await?;

        let deleted = delete_games(&mut transaction, &[id]).await?;

        transaction.commit().await?;

        if deleted > 0 {
            self.notify();
        }

        Ok(deleted > 0)
    }

    /// Deletes games played before `today`. Games without an ISO date are judged
    /// on their display label; unreadable labels are kept.
    #[tracing::instrument(skip(self))]
    pub async fn delete_past_games(&self, today: Date) -> Result<u64, anyhow::Error> {
        let mut transaction = self.pool.begin().await?;

        let today_iso = today.to_db()?;
        let past = query_as::<_, (i64,)>(r#"SELECT id FROM games WHERE date_iso < $1"#)
            .bind(&today_iso)
            .fetch_all(&mut *transaction)
            .await?;

        let undated = query_as::<_, (i64, String)>(
            r#"SELECT id, date_label FROM games WHERE date_iso IS NULL"#,
        )
        .fetch_all(&mut *transaction)
        .await?;

        let mut ids = past
            .iter()
            .map(|(id,)| GameId::from_db(id))
            .collect::<Result<Vec<_>, _>>()?;

        for (id, label) in &undated {
            match parse_french_date(label, today.year()) {
                Some(date) if date < today => ids.push(GameId::from_db(id)?),
                Some(_) => {}
                None => debug!("Keeping game {id}: cannot read date `{label}`"),
            }
        }

        let deleted = delete_games(&mut transaction, &ids).await?;

        transaction.commit().await?;

        if deleted > 0 {
            info!("Deleted {deleted} past games");
            self.notify();
        }

        Ok(deleted)
    }

    /// Runs the one-time seeding: inserts `seed` unless it was done before.
    /// Returns whether the games were inserted.
    #[tracing::instrument(skip_all, fields(count = seed.len()))]
    pub async fn initialize_once(&self, seed: &[NewGame]) -> Result<bool, anyhow::Error> {
        let mut transaction = self.pool.begin().await?;

        let already_done = query_as::<_, (String,)>(r#"SELECT value FROM system WHERE key = $1"#)
            .bind(INITIALIZED_KEY)
            .fetch_optional(&mut *transaction)
            .await?
            .is_some();

        if already_done {
            debug!("Database already initialized");
            return Ok(false);
        }

        for new_game in seed {
            insert_game(&mut transaction, new_game).await?;
        }

        query(r#"INSERT INTO system (key, value) VALUES ($1, $2)"#)
            .bind(INITIALIZED_KEY)
            .bind(crate::models::types::UtcDateTime::now().to_db()?)
            .execute(&mut *transaction)
            .await?;

        transaction.commit().await?;

        info!("Database initialized with {} games", seed.len());
        self.notify();

        Ok(true)
    }
}

#[async_trait]
impl GameStore for GameRepository {
    async fn load_game(&self, id: GameId) -> Result<Option<VersionedGame>, StoreError> {
        let mut connection = self.pool.acquire().await?;
        select_game(&mut connection, id).await
    }

    async fn load_registrations(&self, game: GameId) -> Result<Vec<UserRegistration>, StoreError> {
        let mut connection = self.pool.acquire().await?;
        registrations_on_game(&mut connection, game).await
    }

    /// Writes roles, carpool and index changes in one transaction, only if the
    /// game still has the version it was read at.
    async fn commit(&self, commit: GameCommit) -> Result<CommitOutcome, StoreError> {
        let mut transaction = self.pool.begin().await?;

        let game_id = commit.game.id.to_db()?;

        let updated = query(
            r#"
                UPDATE games
                SET roles = $1, carpool = $2, version = version + 1
                WHERE id = $3 AND version = $4
            "#,
        )
        .bind(commit.game.roles.to_db()?)
        .bind(commit.game.carpool.to_db()?)
        .bind(game_id)
        .bind(commit.expected_version)
        .execute(&mut *transaction)
        .await?
        .rows_affected();

        if updated == 0 {
            // Dropping the transaction rolls it back.
            return Ok(CommitOutcome::Conflict);
        }

        for write in &commit.index_writes {
            apply_index_write(&mut transaction, write).await?;
        }

        transaction.commit().await?;

        self.notify();

        Ok(CommitOutcome::Committed)
    }
}

async fn insert_game(
    connection: &mut SqliteConnection,
    new_game: &NewGame,
) -> Result<GameId, StoreError> {
    let fixture = &new_game.fixture;

    let result = query(
        r#"
            INSERT INTO games (
                team,
                opponent,
                date_label,
                date_iso,
                time_label,
                location,
                is_home,
                roles,
                carpool)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, '[]')
        "#,
    )
    .bind(&fixture.team)
    .bind(&fixture.opponent)
    .bind(&fixture.date_label)
    .bind(fixture.date.to_db()?)
    .bind(&fixture.time_label)
    .bind(&fixture.location)
    .bind(fixture.is_home)
    .bind(new_game.roles.to_db()?)
    .execute(connection)
    .await?;

    Ok(GameId::from_db(&result.last_insert_rowid())?)
}

async fn select_game(
    connection: &mut SqliteConnection,
    id: GameId,
) -> Result<Option<VersionedGame>, StoreError> {
    let game = query_as::<_, SqlGame>(r#"SELECT * FROM games WHERE id = $1"#)
        .bind(id.to_db()?)
        .fetch_optional(connection)
        .await?;

    match game {
        Some(game) => Ok(Some(VersionedGame {
            game: Game::from_row(&game)?,
            version: game.version,
        })),
        None => Ok(None),
    }
}

async fn delete_games(connection: &mut SqliteConnection, ids: &[GameId]) -> Result<u64, StoreError> {
    let mut deleted = 0;

    for id in ids {
        let id = id.to_db()?;

        query(r#"DELETE FROM user_registrations WHERE game_id = $1"#)
            .bind(id)
            .execute(&mut *connection)
            .await?;

        let rows = query(r#"DELETE FROM games WHERE id = $1"#)
            .bind(id)
            .execute(&mut *connection)
            .await?
            .rows_affected();

        if rows > 1 {
            warn!("Deleted more than one game with id {id}");
        }

        deleted += rows;
    }

    Ok(deleted)
}

async fn apply_index_write(
    connection: &mut SqliteConnection,
    write: &IndexWrite,
) -> Result<(), StoreError> {
    match write {
        IndexWrite::Insert(registration) => insert_registration(connection, registration).await,

        IndexWrite::Delete(id) => {
            query(r#"DELETE FROM user_registrations WHERE id = $1"#)
                .bind(id.to_db()?)
                .execute(connection)
                .await?;
            Ok(())
        }

        IndexWrite::Rename { id, volunteer_name } => {
            query(r#"UPDATE user_registrations SET volunteer_name = $1 WHERE id = $2"#)
                .bind(volunteer_name)
                .bind(id.to_db()?)
                .execute(connection)
                .await?;
            Ok(())
        }
    }
}

async fn insert_registration(
    connection: &mut SqliteConnection,
    registration: &NewRegistration,
) -> Result<(), StoreError> {
    query(
        r#"
            INSERT INTO user_registrations (
                member,
                game_id,
                role_id,
                role_name,
                volunteer_name,
                game_date_label,
                game_date_iso,
                game_time,
                location,
                team,
                opponent,
                created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(registration.member.to_db()?)
    .bind(registration.game_id.to_db()?)
    .bind(registration.role_id.to_db()?)
    .bind(&registration.role_name)
    .bind(&registration.volunteer_name)
    .bind(&registration.game_date_label)
    .bind(registration.game_date.to_db()?)
    .bind(&registration.game_time)
    .bind(&registration.location)
    .bind(&registration.team)
    .bind(&registration.opponent)
    .bind(registration.created_at.to_db()?)
    .execute(connection)
    .await?;

    Ok(())
}

#[derive(Debug, sqlx::FromRow)]
pub struct SqlGame {
    id: i64,
    team: String,
    opponent: String,
    date_label: String,
    date_iso: Option<String>,
    time_label: String,
    location: String,
    is_home: bool,
    roles: String,
    carpool: String,
    version: i64,
}

impl Game {
    fn from_row(value: &SqlGame) -> Result<Game, DBFromConversionError> {
        Ok(Game {
            id: GameId::from_db(&value.id)?,
            fixture: Fixture {
                team: value.team.clone(),
                opponent: value.opponent.clone(),
                date_label: value.date_label.clone(),
                date: Option::<Date>::from_db(&value.date_iso)?,
                time_label: value.time_label.clone(),
                location: value.location.clone(),
                is_home: value.is_home,
            },
            roles: Vec::<Role>::from_db(&value.roles)?,
            carpool: Vec::<CarpoolEntry>::from_db(&value.carpool)?,
        })
    }
}
