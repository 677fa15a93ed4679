#![forbid(unsafe_code)]

mod board_service;
mod cleanup_service;
mod commands;
mod import;
mod ledger;
mod models;
mod poise_error_handler;
mod projection;
mod repository;
mod settings;
mod utils;

use std::{
    path::{Path, PathBuf},
    process::exit,
    sync::Arc,
};

use anyhow::anyhow;
use board_service::BoardService;
use chrono_tz::Tz;
use cleanup_service::CleanupService;
use import::{load_fixture_file, ClubProfile};
use ledger::RegistrationLedger;
use poise::{serenity_prelude::*, Framework};
use poise_error_handler::handle_error;
use repository::{
    AnnouncementRepository, FavoriteTeamRepository, GameRepository, RegistrationRepository,
    SystemRepository,
};
use serde::Deserialize;
use settings::ClubSettings;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tokio::{select, signal, sync::Notify};
use tracing::{error, info, info_span, warn, Instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Deserialize)]
struct AppConfig {
    discord_bot_token: String,
    database_url: String,
    register_commands_globally: Option<bool>,
    register_commands_in_guilds: Option<Vec<u64>>,
    club_time_zone: Option<String>,
    strict_capacity: Option<bool>,
    club_name_patterns: Option<Vec<String>>,
    default_import_team: Option<String>,
    board_channel: Option<u64>,
    seed_fixtures: Option<PathBuf>,
    cleanup_hour: Option<u8>,
}

impl AppConfig {
    fn club_settings(&self) -> anyhow::Result<ClubSettings> {
        let defaults = ClubSettings::default();

        let time_zone = match &self.club_time_zone {
            Some(zone) => zone
                .trim()
                .parse::<Tz>()
                .map_err(|err| anyhow!("Invalid CLUB_TIME_ZONE {zone:?}: {err}"))?,
            None => defaults.time_zone,
        };

        let cleanup_hour = self.cleanup_hour.unwrap_or(defaults.cleanup_hour);
        if cleanup_hour > 23 {
            return Err(anyhow!("Invalid CLEANUP_HOUR: {cleanup_hour}"));
        }

        let mut profile = ClubProfile::default();
        if let Some(patterns) = &self.club_name_patterns {
            profile.name_patterns = patterns
                .iter()
                .map(|pattern| pattern.trim().to_uppercase())
                .filter(|pattern| !pattern.is_empty())
                .collect();
        }
        if let Some(team) = &self.default_import_team {
            profile.default_team = team.trim().to_uppercase();
        }

        Ok(ClubSettings {
            time_zone,
            strict_capacity: self.strict_capacity.unwrap_or(defaults.strict_capacity),
            profile,
            cleanup_hour,
        })
    }
}

pub struct BotState {
    pub game_repository: Arc<GameRepository>,
    pub registration_repository: Arc<RegistrationRepository>,
    pub announcement_repository: Arc<AnnouncementRepository>,
    pub favorite_team_repository: Arc<FavoriteTeamRepository>,
    pub ledger: RegistrationLedger<GameRepository>,
    pub settings: ClubSettings,
}

#[tracing::instrument]
#[tokio::main]
async fn main() {
    if let Err(err) = dotenvy::dotenv() {
        warn!("Could not load config from .env file: {err}");
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(
                    "volunteer_roster_bot=info"
                        .parse()
                        .expect("Hard-coded default directive should be correct"),
                )
                .from_env_lossy(),
        )
        .init();

    let app_config = match envy::from_env::<AppConfig>() {
        Ok(config) => config,
        Err(err) => {
            error!("Could not load app config: {err}");
            exit(255);
        }
    };

    let settings = match app_config.club_settings() {
        Ok(settings) => settings,
        Err(err) => {
            error!("Could not load club settings: {err}");
            exit(255);
        }
    };

    let db_pool = match setup_database(&app_config.database_url).await {
        Ok(pool) => pool,
        Err(err) => {
            error!("Could not setup database: {err}");
            exit(255);
        }
    };

    let game_repository = Arc::new(GameRepository::new(db_pool.clone()));

    if let Some(path) = &app_config.seed_fixtures {
        seed_fixtures(&game_repository, path, &settings).await;
    }

    let shutdown_notify = Arc::new(Notify::new());
    let services_shutdown = shutdown_notify.clone();

    let app_state = BotState {
        game_repository: game_repository.clone(),
        registration_repository: Arc::new(RegistrationRepository::new(db_pool.clone())),
        announcement_repository: Arc::new(AnnouncementRepository::new(db_pool.clone())),
        favorite_team_repository: Arc::new(FavoriteTeamRepository::new(db_pool.clone())),
        ledger: RegistrationLedger::new(game_repository, settings.strict_capacity),
        settings,
    };

    let board_channel = app_config.board_channel.map(ChannelId::new);
    let system_repository = Arc::new(SystemRepository::new(db_pool.clone()));

    let framework = Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all_commands(),
            on_error: |error| Box::pin(handle_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(
                async move {
                    let commands = &framework.options().commands;

                    if let Some(true) = app_config.register_commands_globally {
                        info!("Registering commands globally");
                        poise::builtins::register_globally(ctx, commands).await?;
                    }

                    if let Some(guilds) = app_config.register_commands_in_guilds {
                        for guild in guilds.iter().map(|g| GuildId::new(*g)) {
                            let guild_name = ctx
                                .http()
                                .get_guild(guild)
                                .await
                                .map(|g| g.name)
                                .unwrap_or("???".to_string());

                            info!("Registering commands in guild {guild} ({guild_name})");

                            poise::builtins::register_in_guild(ctx, commands, guild).await?;
                        }
                    }

                    CleanupService::create_and_start(
                        services_shutdown.clone(),
                        app_state.game_repository.clone(),
                        app_state.announcement_repository.clone(),
                        app_state.settings.clone(),
                    );

                    if let Some(channel) = board_channel {
                        info!("Keeping the roster board up to date in channel {channel}");
                        BoardService::create_and_start(
                            services_shutdown,
                            ctx.http.clone(),
                            channel,
                            app_state.game_repository.clone(),
                            system_repository,
                            app_state.settings.clone(),
                        );
                    }

                    Ok(app_state)
                }
                .instrument(info_span!("bot_setup")),
            )
        })
        .build();

    let mut client = match ClientBuilder::new(app_config.discord_bot_token, GatewayIntents::empty())
        .framework(framework)
        .await
    {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to create the client: {err}");
            exit(255);
        }
    };

    select! {
        _ = signal::ctrl_c() => {
            info!("Ctrl-C received, shutting down");
            shutdown_notify.notify_waiters();
            client.shard_manager.shutdown_all().await;
            db_pool.close().await;
        },

        result = client.start() => {
            if let Err(err) = result {
                error!("Failed to start the client: {err}");
            }
        },
    };
}

#[tracing::instrument(skip(url))]
async fn setup_database(url: &str) -> anyhow::Result<SqlitePool> {
    info!("Connecting to SQLite database at {url}");
    let pool = SqlitePoolOptions::new().connect(url).await?;
    info!("Running migrations");
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Done!");
    Ok(pool)
}

/// Imports the season's fixtures on the very first start. Failures are logged, the bot
/// still starts with an empty roster.
#[tracing::instrument(skip(game_repository, settings))]
async fn seed_fixtures(game_repository: &GameRepository, path: &Path, settings: &ClubSettings) {
    let games = match load_fixture_file(path, &settings.profile, settings.today()).await {
        Ok(games) => games,
        Err(err) => {
            error!("Could not read seed fixtures: {err}");
            return;
        }
    };

    match game_repository.initialize_once(&games).await {
        Ok(true) => info!("Seeded {} games", games.len()),
        Ok(false) => info!("Database already seeded, ignoring {}", path.display()),
        Err(err) => error!("Could not seed the database: {err}"),
    }
}
