use sqlx::{query, query_as, Pool, Sqlite};

/// Small key/value facts the bot keeps between restarts.
pub struct SystemRepository {
    pool: Pool<Sqlite>,
}

impl SystemRepository {
    pub fn new(pool: Pool<Sqlite>) -> SystemRepository {
        SystemRepository { pool }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, anyhow::Error> {
        let value = query_as::<_, (String,)>(r#"SELECT value FROM system WHERE key = $1"#)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value.map(|(value,)| value))
    }

    #[tracing::instrument(skip(self))]
    pub async fn set(&self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        query(
            r#"
                INSERT INTO system (key, value) VALUES ($1, $2)
                ON CONFLICT (key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_pool;

    use super::SystemRepository;

    #[test_log::test(tokio::test)]
    async fn values_are_overwritten() {
        let repository = SystemRepository::new(test_pool().await);

        assert_eq!(repository.get("board_message:1").await.unwrap(), None);

        repository.set("board_message:1", "10").await.unwrap();
        repository.set("board_message:1", "11").await.unwrap();

        assert_eq!(
            repository.get("board_message:1").await.unwrap().as_deref(),
            Some("11")
        );
    }
}
