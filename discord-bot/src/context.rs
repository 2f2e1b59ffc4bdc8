use database::Database;
use reddit_client::RedditApiClient;
use std::sync::Arc;

/// Everything a handler needs, passed in explicitly rather than held globally.
#[derive(Debug, Clone)]
pub struct BotContext {
    pub reddit: RedditApiClient,
    /// Opened at startup; nothing is stored yet.
    pub database: Arc<Database>,
    pub default_subreddit: String,
}

impl BotContext {
    pub fn new(reddit: RedditApiClient, database: Arc<Database>, default_subreddit: String) -> Self {
        Self {
            reddit,
            database,
            default_subreddit,
        }
    }
}
