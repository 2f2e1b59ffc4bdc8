//! The replies a handler can send for one interaction, and their Discord
//! implementation.

use async_trait::async_trait;
use redditcord_core::{CoreError, SearchChoice};
use serenity::builder::{
    CreateAutocompleteResponse, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter,
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
};
use serenity::http::Http;
use serenity::model::id::InteractionId;
use std::sync::Arc;
use tracing::debug;

use crate::embed::PostEmbed;

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Embed(PostEmbed),
}

/// Answers a single interaction. Each method maps to one Discord call.
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Deferred, ephemeral placeholder; must land within Discord's ack window.
    async fn acknowledge(&self) -> Result<(), CoreError>;

    /// Replaces the deferred placeholder.
    async fn edit(&self, reply: Reply) -> Result<(), CoreError>;

    async fn autocomplete(&self, choices: Vec<SearchChoice>) -> Result<(), CoreError>;
}

pub struct DiscordResponder {
    http: Arc<Http>,
    interaction_id: InteractionId,
    token: String,
}

impl DiscordResponder {
    pub fn new(http: Arc<Http>, interaction_id: InteractionId, token: String) -> Self {
        Self {
            http,
            interaction_id,
            token,
        }
    }
}

#[async_trait]
impl InteractionResponder for DiscordResponder {
    async fn acknowledge(&self) -> Result<(), CoreError> {
        let response =
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new().ephemeral(true));

        self.http
            .create_interaction_response(self.interaction_id, &self.token, &response, Vec::new())
            .await
            .map_err(|e| platform_error("acknowledge", e))?;

        debug!("Deferred interaction {}", self.interaction_id);
        Ok(())
    }

    async fn edit(&self, reply: Reply) -> Result<(), CoreError> {
        let builder = match reply {
            Reply::Text(content) => EditInteractionResponse::new().content(content),
            Reply::Embed(embed) => EditInteractionResponse::new().embed(embed.into()),
        };

        self.http
            .edit_original_interaction_response(&self.token, &builder, Vec::new())
            .await
            .map_err(|e| platform_error("edit", e))?;

        debug!("Edited response for interaction {}", self.interaction_id);
        Ok(())
    }

    async fn autocomplete(&self, choices: Vec<SearchChoice>) -> Result<(), CoreError> {
        let choice_count = choices.len();
        let response = choices
            .into_iter()
            .fold(CreateAutocompleteResponse::new(), |response, choice| {
                response.add_string_choice(choice.label, choice.value)
            });

        self.http
            .create_interaction_response(
                self.interaction_id,
                &self.token,
                &CreateInteractionResponse::Autocomplete(response),
                Vec::new(),
            )
            .await
            .map_err(|e| platform_error("autocomplete", e))?;

        debug!(
            "Sent {} autocomplete choices for interaction {}",
            choice_count, self.interaction_id
        );
        Ok(())
    }
}

impl From<PostEmbed> for CreateEmbed {
    fn from(embed: PostEmbed) -> Self {
        CreateEmbed::new()
            .author(CreateEmbedAuthor::new(embed.author))
            .title(embed.title)
            .description(embed.description)
            .url(embed.url)
            .colour(embed.colour)
            .image(embed.image_url)
            .footer(CreateEmbedFooter::new(embed.footer))
    }
}

fn platform_error(operation: &str, error: serenity::Error) -> CoreError {
    CoreError::Platform {
        operation: operation.to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_embed_into_create_embed() {
        let embed = PostEmbed {
            author: "r/memes".to_string(),
            title: "A title".to_string(),
            description: "Posted by u/someone • [i.redd.it](https://i.redd.it/x.png)".to_string(),
            url: "https://www.reddit.com/r/memes/comments/x/".to_string(),
            image_url: "https://i.redd.it/x.png".to_string(),
            footer: "⬆️ 1 • ⬇️ 0 • 💬 0".to_string(),
            colour: 0,
        };

        let rendered = serde_json::to_value(CreateEmbed::from(embed)).unwrap();
        assert_eq!(rendered["title"], "A title");
        assert_eq!(rendered["url"], "https://www.reddit.com/r/memes/comments/x/");
        assert_eq!(rendered["author"]["name"], "r/memes");
        assert_eq!(rendered["image"]["url"], "https://i.redd.it/x.png");
        assert_eq!(rendered["footer"]["text"], "⬆️ 1 • ⬇️ 0 • 💬 0");
    }
}
