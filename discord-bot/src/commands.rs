//! Slash command definitions and registration.

use redditcord_core::CoreError;
use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::http::Http;
use serenity::model::application::{Command, CommandOptionType};
use std::sync::Arc;
use tracing::info;

pub const REDDIT_COMMAND: &str = "reddit";
pub const SUBREDDIT_OPTION: &str = "subreddit";

/// Reddit limits subreddit names to 21 characters.
const MAX_SUBREDDIT_LENGTH: u16 = 21;

pub fn reddit_command() -> CreateCommand {
    CreateCommand::new(REDDIT_COMMAND)
        .description("Gets recent posts from any public subreddit")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                SUBREDDIT_OPTION,
                "Name of the subreddit to fetch",
            )
            .required(false)
            .min_length(1)
            .max_length(MAX_SUBREDDIT_LENGTH)
            .set_autocomplete(true),
        )
}

/// Creates (or overwrites) the global `/reddit` command.
pub async fn register_commands(http: &Arc<Http>) -> Result<(), CoreError> {
    let command = Command::create_global_command(http, reddit_command())
        .await
        .map_err(|e| CoreError::Platform {
            operation: "command registration".to_string(),
            message: e.to_string(),
        })?;

    info!("Registered /{} as global command {}", command.name, command.id);
    Ok(())
}
