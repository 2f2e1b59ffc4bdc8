use clap::Parser;
use database::Database;
use discord_bot::{BotContext, Handler, InteractionRouter};
use reddit_client::RedditApiClient;
use redditcord_core::{AppConfig, CoreError, ErrorExt};
use serenity::model::gateway::GatewayIntents;
use serenity::model::id::ApplicationId;
use serenity::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

const DEFAULT_LOG_FILTER: &str = "redditcord=info,discord_bot=debug,reddit_client=debug,database=info";

/// Discord bot serving posts from public subreddits through `/reddit`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Read configuration from this TOML file instead of the environment
    #[arg(short, long, env = "REDDITCORD_CONFIG")]
    config: Option<PathBuf>,

    /// Do not (re)register the slash command on startup
    #[arg(long)]
    skip_register: bool,
}

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    // Before tracing init so `.env` can set RUST_LOG.
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env file loaded: {}", e),
    }
    info!("Starting redditcord {}", env!("CARGO_PKG_VERSION"));

    run(args).await.map_err(|e| {
        e.log_error();
        error!("[{}] {}", e.error_code(), e.user_friendly_message());
        e
    })
}

async fn run(args: Args) -> Result<(), CoreError> {
    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };
    config.validate()?;
    info!("Loaded configuration: {:?}", config);

    let mut database = Database::new(config.database_url.clone());
    database.connect().await?;
    database.ping().await?;
    let database = Arc::new(database);

    let reddit = RedditApiClient::with_base_url(&config.reddit_base_url, config.user_agent.clone())?;
    let context = Arc::new(BotContext::new(
        reddit,
        database.clone(),
        config.default_subreddit.clone(),
    ));
    let router = Arc::new(InteractionRouter::new(context));

    // Slash commands arrive as interactions; no privileged intents are needed.
    let mut client = Client::builder(&config.discord_token, GatewayIntents::empty())
        .event_handler(Handler::new(router, !args.skip_register))
        .application_id(ApplicationId::new(config.application_id))
        .await
        .map_err(|e| CoreError::Platform {
            operation: "client setup".to_string(),
            message: e.to_string(),
        })?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        wait_for_shutdown().await;
        info!("Shutdown signal received, stopping Discord client...");
        shard_manager.shutdown_all().await;
    });

    info!("Starting Discord gateway connection...");
    let result = client.start().await.map_err(|e| CoreError::Platform {
        operation: "gateway connection".to_string(),
        message: e.to_string(),
    });

    database.close().await;
    info!("Shutdown complete");
    result
}

async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.ok();
    }
}
