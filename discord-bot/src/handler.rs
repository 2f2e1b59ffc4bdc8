use reddit_client::select_post;
use redditcord_core::{CoreError, ErrorExt, ListingQuery, SearchChoice};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::context::BotContext;
use crate::embed::PostEmbed;
use crate::interaction::CommandInvocation;
use crate::responder::{InteractionResponder, Reply};

pub const FETCH_ERROR_MESSAGE: &str = "Error while fetching posts!";
pub const NOT_FOUND_MESSAGE: &str = "Subreddit not found!";

/// Discord refuses autocomplete responses with more choices than this.
pub const MAX_AUTOCOMPLETE_CHOICES: usize = 25;

pub struct CommandHandler {
    ctx: Arc<BotContext>,
}

impl CommandHandler {
    pub fn new(ctx: Arc<BotContext>) -> Self {
        Self { ctx }
    }

    /// Suggests subreddits for the option being typed. Always answers exactly
    /// once, with an empty list when there is nothing to search for.
    pub async fn handle_autocomplete(
        &self,
        invocation: &CommandInvocation,
        responder: &dyn InteractionResponder,
    ) -> Result<(), CoreError> {
        let choices = match invocation.first_option() {
            Some(option) if option.focused && !option.value.is_empty() => {
                self.search(option.value.clone()).await
            }
            _ => Vec::new(),
        };

        responder
            .autocomplete(
                choices
                    .into_iter()
                    .take(MAX_AUTOCOMPLETE_CHOICES)
                    .collect(),
            )
            .await
    }

    /// Acknowledges the command, then replaces the placeholder with the first
    /// embeddable post of the requested subreddit.
    pub async fn handle_reddit(
        &self,
        invocation: &CommandInvocation,
        responder: &dyn InteractionResponder,
    ) -> Result<(), CoreError> {
        let query = ListingQuery::new(
            invocation.first_option().map(|option| option.value.as_str()),
            &self.ctx.default_subreddit,
        );
        info!("Fetching posts from r/{}", query.community());

        // Started before the ack so Reddit latency never delays it.
        let reddit = self.ctx.reddit.clone();
        let community = query.community().to_string();
        let fetch = tokio::spawn(async move { reddit.fetch_listing(&community).await });

        if let Err(e) = responder.acknowledge().await {
            fetch.abort();
            return Err(e);
        }

        let reply = match fetch.await {
            Ok(Ok(listing)) => match select_post(&listing) {
                Some(post) => {
                    debug!("Selected post {} from r/{}", post.id, query.community());
                    Reply::Embed(PostEmbed::from_post(post))
                }
                None => {
                    info!(
                        "No embeddable post among {} from r/{}",
                        listing.posts.len(),
                        query.community()
                    );
                    Reply::Text(NOT_FOUND_MESSAGE.to_string())
                }
            },
            Ok(Err(e)) => {
                e.log_error();
                Reply::Text(FETCH_ERROR_MESSAGE.to_string())
            }
            Err(e) => {
                error!("Listing fetch for r/{} did not finish: {}", query.community(), e);
                Reply::Text(FETCH_ERROR_MESSAGE.to_string())
            }
        };

        responder.edit(reply).await
    }

    async fn search(&self, query: String) -> Vec<SearchChoice> {
        let reddit = self.ctx.reddit.clone();
        match tokio::spawn(async move { reddit.search_subreddits(&query).await }).await {
            Ok(choices) => choices,
            Err(e) => {
                warn!("Subreddit search did not finish: {}", e);
                Vec::new()
            }
        }
    }
}
