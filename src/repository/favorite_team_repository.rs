use poise::serenity_prelude::UserId;
use sqlx::{query, query_as, Pool, Sqlite};
use tracing::debug;

use super::conversion::DBConvertible;

/// Teams each member follows. They narrow the team choices offered to that member.
pub struct FavoriteTeamRepository {
    pool: Pool<Sqlite>,
}

impl FavoriteTeamRepository {
    pub fn new(pool: Pool<Sqlite>) -> FavoriteTeamRepository {
        FavoriteTeamRepository { pool }
    }

    pub async fn list(&self, member: UserId) -> Result<Vec<String>, anyhow::Error> {
        let teams = query_as::<_, (String,)>(
            r#"SELECT team FROM favorite_teams WHERE member = $1 ORDER BY team"#,
        )
        .bind(member.to_db()?)
        .fetch_all(&self.pool)
        .await?;

        Ok(teams.into_iter().map(|(team,)| team).collect())
    }

    /// Adds the team, or removes it when already followed. Returns whether it is
    /// followed afterwards.
    #[tracing::instrument(skip(self))]
    pub async fn toggle(&self, member: UserId, team: &str) -> Result<bool, anyhow::Error> {
        let mut transaction = self.pool.begin().await?;

        let removed = query(r#"DELETE FROM favorite_teams WHERE member = $1 AND team = $2"#)
            .bind(member.to_db()?)
            .bind(team)
            .execute(&mut *transaction)
            .await?
            .rows_affected();

        if removed == 0 {
            query(r#"INSERT INTO favorite_teams (member, team) VALUES ($1, $2)"#)
                .bind(member.to_db()?)
                .bind(team)
                .execute(&mut *transaction)
                .await?;
        }

        transaction.commit().await?;

        debug!("{member} {} {team}", if removed == 0 { "follows" } else { "unfollows" });
        Ok(removed == 0)
    }
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude::UserId;

    use crate::repository::test_pool;

    use super::FavoriteTeamRepository;

    #[test_log::test(tokio::test)]
    async fn toggling_twice_unfollows() {
        let repository = FavoriteTeamRepository::new(test_pool().await);
        let member = UserId::new(42);

        assert!(repository.toggle(member, "U11 M1").await.unwrap());
        assert!(repository.toggle(member, "SENIOR M1").await.unwrap());
        assert!(repository.toggle(UserId::new(7), "U13 F1").await.unwrap());
        assert_eq!(repository.list(member).await.unwrap(), vec!["SENIOR M1", "U11 M1"]);

        assert!(!repository.toggle(member, "U11 M1").await.unwrap());
        assert_eq!(repository.list(member).await.unwrap(), vec!["SENIOR M1"]);
    }
}
