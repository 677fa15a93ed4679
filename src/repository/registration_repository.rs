use std::collections::HashSet;

use poise::serenity_prelude::UserId;
use sqlx::{query_as, Pool, Sqlite, SqliteConnection};
use time::Date;

use crate::{
    ledger::StoreError,
    models::{types::UtcDateTime, GameId, RegistrationId, RoleId, UserRegistration},
};

use super::conversion::{DBConvertible, DBFromConversionError, DBToConversionError};

/// Read side of the per-member registration index. Writes go through the ledger.
pub struct RegistrationRepository {
    pool: Pool<Sqlite>,
}

impl RegistrationRepository {
    pub fn new(pool: Pool<Sqlite>) -> RegistrationRepository {
        RegistrationRepository { pool }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_for_member(
        &self,
        member: UserId,
    ) -> Result<Vec<UserRegistration>, anyhow::Error> {
        let mut transaction = self.pool.begin().await?;

        let registrations = query_as::<_, SqlUserRegistration>(
            r#"
                SELECT * FROM user_registrations
                WHERE member = $1
                ORDER BY game_date_iso, game_time, id
            "#,
        )
        .bind(member.to_db()?)
        .fetch_all(&mut *transaction)
        .await?;

        transaction.commit().await?;

        registrations
            .iter()
            .map(|registration| Ok(UserRegistration::from_db(registration)?))
            .collect()
    }

    /// Games the member volunteers for, the "my games" filter.
    pub async fn member_game_ids(&self, member: UserId) -> Result<HashSet<GameId>, anyhow::Error> {
        Ok(self
            .list_for_member(member)
            .await?
            .into_iter()
            .map(|registration| registration.game_id)
            .collect())
    }
}

/// Every member's registrations on one game, oldest first.
pub(super) async fn registrations_on_game(
    connection: &mut SqliteConnection,
    game: GameId,
) -> Result<Vec<UserRegistration>, StoreError> {
    let registrations = query_as::<_, SqlUserRegistration>(
        r#"
            SELECT * FROM user_registrations
            WHERE game_id = $1
            ORDER BY id
        "#,
    )
    .bind(game.to_db()?)
    .fetch_all(connection)
    .await?;

    registrations
        .iter()
        .map(|registration| Ok(UserRegistration::from_db(registration)?))
        .collect()
}

#[derive(Debug, sqlx::FromRow)]
pub struct SqlUserRegistration {
    id: i64,
    member: i64,
    game_id: i64,
    role_id: i64,
    role_name: String,
    volunteer_name: String,
    game_date_label: String,
    game_date_iso: Option<String>,
    game_time: String,
    location: String,
    team: String,
    opponent: String,
    created_at: String,
}

impl DBConvertible for UserRegistration {
    type DBType = SqlUserRegistration;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        Ok(SqlUserRegistration {
            id: self.id.to_db()?,
            member: self.member.to_db()?,
            game_id: self.game_id.to_db()?,
            role_id: self.role_id.to_db()?,
            role_name: self.role_name.clone(),
            volunteer_name: self.volunteer_name.clone(),
            game_date_label: self.game_date_label.clone(),
            game_date_iso: self.game_date.to_db()?,
            game_time: self.game_time.clone(),
            location: self.location.clone(),
            team: self.team.clone(),
            opponent: self.opponent.clone(),
            created_at: self.created_at.to_db()?,
        })
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        Ok(UserRegistration {
            id: RegistrationId::from_db(&value.id)?,
            member: UserId::from_db(&value.member)?,
            game_id: GameId::from_db(&value.game_id)?,
            role_id: RoleId::from_db(&value.role_id)?,
            role_name: value.role_name.clone(),
            volunteer_name: value.volunteer_name.clone(),
            game_date_label: value.game_date_label.clone(),
            game_date: Option::<Date>::from_db(&value.game_date_iso)?,
            game_time: value.game_time.clone(),
            location: value.location.clone(),
            team: value.team.clone(),
            opponent: value.opponent.clone(),
            created_at: UtcDateTime::from_db(&value.created_at)?,
        })
    }
}
