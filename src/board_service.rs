use std::{fmt::Write, sync::Arc};

use serenity::{
    all::{ChannelId, CreateMessage, EditMessage, MessageId},
    http::Http,
};
use time::{Duration, PrimitiveDateTime};
use tokio::{
    select,
    sync::{broadcast::error::RecvError, Notify},
};
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::{
    models::Game,
    projection::{filter_upcoming, group_by_week, is_urgent, roster_stats, sort_chronological},
    repository::{GameRepository, GameStorageEvent, SystemRepository},
    settings::ClubSettings,
    utils::{
        formatting::{game_line, game_title, truncate_message},
        timestamp, TimestampStyle,
    },
};

/// Refresh period without any change, so urgency flags follow the clock.
const REFRESH_PERIOD: Duration = Duration::hours(1);
/// How far ahead the board looks.
const BOARD_HORIZON: Duration = Duration::days(21);

/// Keeps one message in a channel in sync with the roster.
pub struct BoardService {
    http: Arc<Http>,
    channel: ChannelId,
    game_repository: Arc<GameRepository>,
    system_repository: Arc<SystemRepository>,
    settings: ClubSettings,
    message: Option<MessageId>,
}

fn message_key(channel: ChannelId) -> String {
    format!("board_message:{channel}")
}

impl BoardService {
    pub fn create_and_start(
        shutdown: Arc<Notify>,
        http: Arc<Http>,
        channel: ChannelId,
        game_repository: Arc<GameRepository>,
        system_repository: Arc<SystemRepository>,
        settings: ClubSettings,
    ) {
        let service = BoardService {
            http,
            channel,
            game_repository,
            system_repository,
            settings,
            message: None,
        };

        tokio::spawn(service.run(shutdown).instrument(info_span!("board_service")));
    }

    async fn run(mut self, shutdown: Arc<Notify>) {
        let mut game_events = self.game_repository.subscribe();
        self.message = self.stored_message().await;
        let refresh_period = std::time::Duration::from_secs(REFRESH_PERIOD.whole_seconds() as u64);

        loop {
            if let Err(err) = self.refresh().await {
                error!("Could not refresh the roster board: {err}");
            }

            select! {
                _ = tokio::time::sleep(refresh_period) => {
                    debug!("Periodic board refresh");
                }

                evt = game_events.recv() => {
                    match evt {
                        Ok(GameStorageEvent::GamesUpdated) => {}
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("Board fell behind by {skipped} game events");
                        }
                        Err(RecvError::Closed) => {
                            info!("Game events closed, board service stopped");
                            return;
                        }
                    }
                }

                _ = shutdown.notified() => {
                    info!("Board service stopped");
                    return;
                }
            }
        }
    }

    /// The board posted before the last restart, if any.
    async fn stored_message(&self) -> Option<MessageId> {
        match self.system_repository.get(&message_key(self.channel)).await {
            Ok(value) => value
                .and_then(|id| id.parse::<u64>().ok())
                .filter(|id| *id != 0)
                .map(MessageId::new),
            Err(err) => {
                warn!("Could not read the board message id: {err}");
                None
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn refresh(&mut self) -> Result<(), anyhow::Error> {
        let now_local = self.settings.now_local();
        let mut games = self.game_repository.list_games().await?;
        sort_chronological(&mut games, now_local.year());

        let content = render_board(games, now_local, &self.settings);

        if let Some(message) = self.message {
            match self
                .channel
                .edit_message(&self.http, message, EditMessage::new().content(&content))
                .await
            {
                Ok(_) => return Ok(()),
                Err(err) => {
                    warn!("Could not edit the board message {message}, posting a new one: {err}");
                }
            }
        }

        let message = self
            .channel
            .send_message(&self.http, CreateMessage::new().content(content))
            .await?;
        info!("Posted the roster board as message {}", message.id);
        self.message = Some(message.id);

        self.system_repository
            .set(&message_key(self.channel), &message.id.get().to_string())
            .await?;

        Ok(())
    }
}

fn render_board(games: Vec<Game>, now_local: PrimitiveDateTime, settings: &ClubSettings) -> String {
    let horizon = now_local.date() + BOARD_HORIZON;
    let games = filter_upcoming(games, now_local)
        .into_iter()
        .filter(|game| game.fixture.date.map_or(true, |date| date <= horizon))
        .collect::<Vec<_>>();

    let stats = roster_stats(&games);
    let mut content = format!(
        "# 📋 Planning des bénévoles\n\
         {} match(s) à domicile d'ici 3 semaines · {}/{} postes pourvus ({} %)\n",
        stats.home_games, stats.filled, stats.target, stats.percent
    );

    let urgent = games
        .iter()
        .filter(|game| is_urgent(game, now_local))
        .map(|game| format!("`#{}` {}", game.id, game_title(&game.fixture)))
        .collect::<Vec<_>>();
    if !urgent.is_empty() {
        let _ = writeln!(content, "🚨 **Il manque du monde** : {}", urgent.join(", "));
    }

    if games.is_empty() {
        content.push_str("\nAucun match programmé pour les trois prochaines semaines.\n");
    }

    for group in group_by_week(games, now_local.date()) {
        let _ = writeln!(content, "### {}", group.label);
        for game in &group.games {
            let _ = writeln!(content, "{}", game_line(game, now_local));
        }
    }

    let _ = write!(
        content,
        "\nInscriptions : `/benevole inscrire` · Mis à jour {}",
        timestamp(settings.to_instant(now_local), TimestampStyle::RelativeTime)
    );

    truncate_message(content)
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use crate::{
        models::{default_roles_for, Fixture, Game, GameId},
        settings::ClubSettings,
    };

    use serenity::all::ChannelId;

    use super::{message_key, render_board};

    fn home_game(id: u64, date: time::Date) -> Game {
        Game {
            id: GameId(id),
            fixture: Fixture {
                team: "U11 M1".to_string(),
                opponent: "ROYAT BC".to_string(),
                date_label: crate::utils::french_dates::format_date_label(date),
                date: Some(date),
                time_label: "15H00".to_string(),
                location: "Maison des Sports".to_string(),
                is_home: true,
            },
            roles: default_roles_for("U11 M1"),
            carpool: Vec::new(),
        }
    }

    #[test]
    fn board_flags_urgent_games_and_skips_far_ones() {
        let games = vec![
            home_game(1, date!(2024 - 12 - 14)),
            home_game(2, date!(2025 - 03 - 01)),
        ];

        let board = render_board(games, datetime!(2024-12-13 18:00), &ClubSettings::default());

        assert!(board.contains("1 match(s) à domicile"));
        assert!(board.contains("🚨 **Il manque du monde** : `#1` U11 M1 vs ROYAT BC"));
        assert!(board.contains("### Cette semaine"));
        assert!(!board.contains("`#2`"));
    }

    #[test]
    fn empty_board() {
        let board = render_board(Vec::new(), datetime!(2024-12-13 18:00), &ClubSettings::default());

        assert!(board.contains("Aucun match programmé"));
    }

    #[test]
    fn board_message_is_remembered_per_channel() {
        assert_eq!(message_key(ChannelId::new(5)), "board_message:5");
        assert_ne!(message_key(ChannelId::new(5)), message_key(ChannelId::new(6)));
    }
}
