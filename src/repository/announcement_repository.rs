use poise::serenity_prelude::UserId;
use sqlx::{query, query_as, Pool, Sqlite};
use tracing::info;

use crate::models::{
    sort_for_display, types::UtcDateTime, Announcement, AnnouncementId, AnnouncementKind,
    AnnouncementTarget, NewAnnouncement,
};

use super::conversion::{DBConvertible, DBFromConversionError, DBToConversionError};

pub struct AnnouncementRepository {
    pool: Pool<Sqlite>,
}

impl AnnouncementRepository {
    pub fn new(pool: Pool<Sqlite>) -> AnnouncementRepository {
        AnnouncementRepository { pool }
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, announcement: &NewAnnouncement) -> Result<Announcement, anyhow::Error> {
        let mut transaction = self.pool.begin().await?;

        let created = query_as::<_, SqlAnnouncement>(
            r#"
                INSERT INTO announcements (message, kind, active, created_at, expires_at, created_by, target)
                VALUES ($1, $2, TRUE, $3, $4, $5, $6)
                RETURNING *
            "#,
        )
        .bind(&announcement.message)
        .bind(announcement.kind.to_db()?)
        .bind(announcement.created_at.to_db()?)
        .bind(announcement.expires_at.to_db()?)
        .bind(announcement.created_by.to_db()?)
        .bind(announcement.target.to_db()?)
        .fetch_one(&mut *transaction)
        .await?;

        transaction.commit().await?;

        Ok(Announcement::from_db(&created)?)
    }

    /// Active and unexpired, urgent first then newest.
    pub async fn list_active(&self, now: UtcDateTime) -> Result<Vec<Announcement>, anyhow::Error> {
        let rows = query_as::<_, SqlAnnouncement>(
            r#"SELECT * FROM announcements WHERE active AND expires_at > $1"#,
        )
        .bind(now.to_db()?)
        .fetch_all(&self.pool)
        .await?;

        let mut announcements = rows
            .iter()
            .map(Announcement::from_db)
            .collect::<Result<Vec<_>, _>>()?;
        sort_for_display(&mut announcements);

        Ok(announcements)
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_active(&self, id: AnnouncementId, active: bool) -> Result<bool, anyhow::Error> {
        let updated = query(r#"UPDATE announcements SET active = $1 WHERE id = $2"#)
            .bind(active)
            .bind(id.to_db()?)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }

    /// Removes announcements whose expiry has passed. Returns how many went.
    #[tracing::instrument(skip(self))]
    pub async fn delete_expired(&self, now: UtcDateTime) -> Result<u64, anyhow::Error> {
        let deleted = query(r#"DELETE FROM announcements WHERE expires_at <= $1"#)
            .bind(now.to_db()?)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted > 0 {
            info!("Deleted {deleted} expired announcements");
        }

        Ok(deleted)
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct SqlAnnouncement {
    id: i64,
    message: String,
    kind: String,
    active: bool,
    created_at: String,
    expires_at: String,
    created_by: i64,
    target: String,
}

impl DBConvertible for Announcement {
    type DBType = SqlAnnouncement;

    fn to_db(&self) -> Result<Self::DBType, DBToConversionError> {
        Ok(SqlAnnouncement {
            id: self.id.to_db()?,
            message: self.message.clone(),
            kind: self.kind.to_db()?,
            active: self.active,
            created_at: self.created_at.to_db()?,
            expires_at: self.expires_at.to_db()?,
            created_by: self.created_by.to_db()?,
            target: self.target.to_db()?,
        })
    }

    fn from_db(value: &Self::DBType) -> Result<Self, DBFromConversionError> {
        Ok(Announcement {
            id: AnnouncementId::from_db(&value.id)?,
            message: value.message.clone(),
            kind: AnnouncementKind::from_db(&value.kind)?,
            active: value.active,
            created_at: UtcDateTime::from_db(&value.created_at)?,
            expires_at: UtcDateTime::from_db(&value.expires_at)?,
            created_by: UserId::from_db(&value.created_by)?,
            target: AnnouncementTarget::from_db(&value.target)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude::UserId;
    use time::{macros::datetime, Duration};

    use crate::{
        models::{types::UtcDateTime, AnnouncementKind, AnnouncementTarget, NewAnnouncement},
        repository::test_pool,
    };

    use super::AnnouncementRepository;

    fn new_announcement(kind: AnnouncementKind, created_at: UtcDateTime, days: i64) -> NewAnnouncement {
        NewAnnouncement {
            message: format!("{kind:?}"),
            kind,
            created_at,
            expires_at: created_at + Duration::days(days),
            created_by: UserId::new(1),
            target: AnnouncementTarget::All,
        }
    }

    #[test_log::test(tokio::test)]
    async fn active_list_is_sorted_and_filtered() {
        let repository = AnnouncementRepository::new(test_pool().await);
        let now = UtcDateTime::assume_utc(datetime!(2024-12-10 12:00));

        repository
            .create(&new_announcement(AnnouncementKind::Info, now - Duration::hours(1), 7))
            .await
            .unwrap();
        repository
            .create(&new_announcement(AnnouncementKind::Urgent, now - Duration::hours(5), 7))
            .await
            .unwrap();
        let hidden = repository
            .create(&new_announcement(AnnouncementKind::Warning, now, 7))
            .await
            .unwrap();
        repository
            .create(&new_announcement(AnnouncementKind::Urgent, now - Duration::days(3), 1))
            .await
            .unwrap();

        assert!(repository.set_active(hidden.id, false).await.unwrap());

        let active = repository.list_active(now).await.unwrap();
        assert_eq!(
            active.iter().map(|a| a.kind).collect::<Vec<_>>(),
            vec![AnnouncementKind::Urgent, AnnouncementKind::Info]
        );
    }

    #[test_log::test(tokio::test)]
    async fn expired_announcements_are_deleted() {
        let repository = AnnouncementRepository::new(test_pool().await);
        let now = UtcDateTime::assume_utc(datetime!(2024-12-10 12:00));

        repository
            .create(&new_announcement(AnnouncementKind::Info, now - Duration::days(10), 2))
            .await
            .unwrap();
        repository
            .create(&new_announcement(AnnouncementKind::Info, now, 2))
            .await
            .unwrap();

        assert_eq!(repository.delete_expired(now).await.unwrap(), 1);
        assert_eq!(repository.list_active(now).await.unwrap().len(), 1);
    }
}
