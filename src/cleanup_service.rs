use std::{future::Future, sync::Arc};

use time::{Duration, PrimitiveDateTime, Time};
use tokio::{select, sync::Notify};
use tracing::{error, info, info_span, warn, Instrument};

use crate::{
    models::types::UtcDateTime,
    repository::{AnnouncementRepository, GameRepository},
    settings::ClubSettings,
};

const MAX_ATTEMPTS: usize = 3;
const RETRY_DELAY: Duration = Duration::seconds(30);

/// Daily sweep of expired announcements and games already played.
pub struct CleanupService {
    game_repository: Arc<GameRepository>,
    announcement_repository: Arc<AnnouncementRepository>,
    settings: ClubSettings,
}

impl CleanupService {
    pub fn create_and_start(
        shutdown: Arc<Notify>,
        game_repository: Arc<GameRepository>,
        announcement_repository: Arc<AnnouncementRepository>,
        settings: ClubSettings,
    ) {
        let service = CleanupService {
            game_repository,
            announcement_repository,
            settings,
        };

        tokio::spawn(service.run(shutdown).instrument(info_span!("cleanup_service")));
    }

    async fn run(self, shutdown: Arc<Notify>) {
        loop {
            let now_local = self.settings.now_local();
            let next_run = next_run(now_local, self.settings.cleanup_hour);
            let sleep_duration = to_std(next_run - now_local);

            info!("Next cleanup scheduled at {next_run} (in {sleep_duration:?})");

            select! {
                _ = tokio::time::sleep(sleep_duration) => {
                    self.cleanup().await;
                }

                _ = shutdown.notified() => {
                    info!("Cleanup service stopped");
                    return;
                }
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn cleanup(&self) {
        let now = UtcDateTime::now();
        let today = self.settings.today();

        match with_retries("delete expired announcements", RETRY_DELAY, || {
            self.announcement_repository.delete_expired(now)
        })
        .await
        {
            Ok(deleted) => info!("Deleted {deleted} expired announcements"),
            Err(err) => error!("Could not delete expired announcements: {err}"),
        }

        match with_retries("delete past games", RETRY_DELAY, || {
            self.game_repository.delete_past_games(today)
        })
        .await
        {
            Ok(deleted) => info!("Deleted {deleted} games played before {today}"),
            Err(err) => error!("Could not delete past games: {err}"),
        }
    }
}

/// The next occurrence of `hour:00` strictly after `now_local`.
fn next_run(now_local: PrimitiveDateTime, hour: u8) -> PrimitiveDateTime {
    let time = Time::from_hms(hour.min(23), 0, 0).unwrap_or(Time::MIDNIGHT);
    let today = PrimitiveDateTime::new(now_local.date(), time);

    if today > now_local {
        today
    } else {
        today + Duration::days(1)
    }
}

fn to_std(duration: Duration) -> std::time::Duration {
    std::time::Duration::from_millis(duration.whole_milliseconds().max(0) as u64)
}

async fn with_retries<F, Fut>(
    what: &str,
    delay: Duration,
    mut operation: F,
) -> Result<u64, anyhow::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<u64, anyhow::Error>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(count) => return Ok(count),
            Err(err) if attempt < MAX_ATTEMPTS => {
                warn!("Could not {what} (attempt {attempt}/{MAX_ATTEMPTS}): {err}");
                attempt += 1;
                tokio::time::sleep(to_std(delay)).await;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::anyhow;
    use time::{macros::datetime, Duration};

    use super::{next_run, with_retries, MAX_ATTEMPTS};

    #[test]
    fn runs_later_today() {
        assert_eq!(
            next_run(datetime!(2024-12-14 01:30), 2),
            datetime!(2024-12-14 02:00)
        );
    }

    #[test]
    fn runs_tomorrow_once_the_hour_passed() {
        assert_eq!(
            next_run(datetime!(2024-12-14 02:00), 2),
            datetime!(2024-12-15 02:00)
        );
        assert_eq!(
            next_run(datetime!(2024-12-31 23:59), 2),
            datetime!(2025-01-01 02:00)
        );
    }

    #[test_log::test(tokio::test)]
    async fn retries_until_success() {
        let calls = AtomicUsize::new(0);

        let result = with_retries("test", Duration::ZERO, || {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if call < 2 {
                    Err(anyhow!("database is locked"))
                } else {
                    Ok(4)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 4);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test_log::test(tokio::test)]
    async fn gives_up_after_max_attempts() {
        let calls = AtomicUsize::new(0);

        let result = with_retries("test", Duration::ZERO, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(anyhow!("database is locked")) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), MAX_ATTEMPTS);
    }
}
