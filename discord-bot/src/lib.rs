pub mod commands;
pub mod context;
pub mod embed;
pub mod gateway;
pub mod handler;
pub mod interaction;
pub mod responder;
pub mod router;


pub use commands::{reddit_command, register_commands, REDDIT_COMMAND, SUBREDDIT_OPTION};
pub use context::BotContext;
pub use embed::PostEmbed;
pub use gateway::Handler;
pub use handler::{CommandHandler, FETCH_ERROR_MESSAGE, MAX_AUTOCOMPLETE_CHOICES, NOT_FOUND_MESSAGE};
pub use interaction::{CommandInvocation, InboundInteraction, InvocationOption};
pub use responder::{DiscordResponder, InteractionResponder, Reply};
pub use router::InteractionRouter;
