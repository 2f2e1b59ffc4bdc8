use redditcord_core::ErrorExt;
use std::sync::Arc;
use tracing::warn;

use crate::commands::REDDIT_COMMAND;
use crate::context::BotContext;
use crate::handler::CommandHandler;
use crate::interaction::InboundInteraction;
use crate::responder::InteractionResponder;

/// Sends each inbound interaction to the matching handler.
///
/// Anything that is not a known command or its autocomplete is logged and
/// dropped without answering; Discord only routes registered commands here.
pub struct InteractionRouter {
    handler: CommandHandler,
}

impl InteractionRouter {
    pub fn new(ctx: Arc<BotContext>) -> Self {
        Self {
            handler: CommandHandler::new(ctx),
        }
    }

    pub async fn route(&self, interaction: InboundInteraction, responder: &dyn InteractionResponder) {
        let result = match interaction {
            InboundInteraction::Autocomplete(invocation) => {
                if invocation.name == REDDIT_COMMAND {
                    self.handler.handle_autocomplete(&invocation, responder).await
                } else {
                    warn!(
                        "Unhandled autocomplete interaction for command {}",
                        invocation.name
                    );
                    Ok(())
                }
            }
            InboundInteraction::Command(invocation) => match invocation.name.as_str() {
                REDDIT_COMMAND => self.handler.handle_reddit(&invocation, responder).await,
                other => {
                    warn!("Unknown application command: {}", other);
                    Ok(())
                }
            },
            InboundInteraction::Other { kind } => {
                warn!("Unknown interaction type: {}", kind);
                Ok(())
            }
        };

        if let Err(e) = result {
            e.log_error();
        }
    }
}
