//! Serenity event handler: turns gateway events into routed interactions.

use redditcord_core::ErrorExt;
use serenity::async_trait;
use serenity::model::application::{
    CommandDataOption, CommandDataOptionValue, CommandInteraction, Interaction,
};
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

use crate::commands::register_commands;
use crate::interaction::{CommandInvocation, InboundInteraction};
use crate::responder::DiscordResponder;
use crate::router::InteractionRouter;

pub struct Handler {
    router: Arc<InteractionRouter>,
    register_commands: bool,
}

impl Handler {
    pub fn new(router: Arc<InteractionRouter>, register_commands: bool) -> Self {
        Self {
            router,
            register_commands,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Logged in as {}", ready.user.name);

        if !self.register_commands {
            debug!("Skipping command registration");
            return;
        }
        if let Err(e) = register_commands(&ctx.http).await {
            e.log_error();
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let responder = DiscordResponder::new(
            ctx.http.clone(),
            interaction.id(),
            interaction.token().to_string(),
        );

        self.router
            .route(to_inbound(&interaction), &responder)
            .await;
    }
}

pub fn to_inbound(interaction: &Interaction) -> InboundInteraction {
    match interaction {
        Interaction::Command(command) => InboundInteraction::Command(to_invocation(command)),
        Interaction::Autocomplete(command) => {
            InboundInteraction::Autocomplete(to_invocation(command))
        }
        other => InboundInteraction::Other {
            kind: format!("{:?}", other.kind()),
        },
    }
}

fn to_invocation(command: &CommandInteraction) -> CommandInvocation {
    command
        .data
        .options
        .iter()
        .fold(CommandInvocation::new(command.data.name.clone()), |invocation, option| {
            let (value, focused) = option_value(option);
            invocation.with_option(option.name.clone(), value, focused)
        })
}

/// Flattens an option to its string form. Only the option being typed into
/// arrives as `Autocomplete`; that one is the focused option.
fn option_value(option: &CommandDataOption) -> (String, bool) {
    match &option.value {
        CommandDataOptionValue::Autocomplete { value, .. } => (value.clone(), true),
        CommandDataOptionValue::String(value) => (value.clone(), false),
        CommandDataOptionValue::Integer(value) => (value.to_string(), false),
        CommandDataOptionValue::Number(value) => (value.to_string(), false),
        CommandDataOptionValue::Boolean(value) => (value.to_string(), false),
        _ => (String::new(), false),
    }
}
