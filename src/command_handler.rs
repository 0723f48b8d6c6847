//! Top-level slash command dispatch
//!
//! Owns the shared [`CommandContext`] and the [`CommandRegistry`], routing
//! each interaction to the handler registered for its command name.

use anyhow::Result;
use log::{debug, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handlers::create_all_handlers;
use crate::commands::registry::CommandRegistry;
use crate::features::checkin::SessionStore;
use crate::features::guilds::GuildRegistry;

#[derive(Clone)]
pub struct CommandHandler {
    context: Arc<CommandContext>,
    registry: CommandRegistry,
}

impl CommandHandler {
    pub fn new(guilds: Arc<GuildRegistry>, sessions: Arc<SessionStore>) -> Self {
        let mut registry = CommandRegistry::new();
        for handler in create_all_handlers() {
            registry.register(handler);
        }
        CommandHandler {
            context: Arc::new(CommandContext::new(guilds, sessions)),
            registry,
        }
    }

    pub async fn handle_slash_command(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let name = command.data.name.as_str();
        debug!("Dispatching slash command: {name} from user {}", command.user.id);

        match self.registry.get(name) {
            Some(handler) => {
                handler
                    .handle(Arc::clone(&self.context), ctx, command)
                    .await
            }
            None => {
                warn!("No handler registered for command: {name}");
                command
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| message.content("Unknown command."))
                    })
                    .await?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_commands_have_handlers() {
        let handler = CommandHandler::new(
            Arc::new(GuildRegistry::new()),
            Arc::new(SessionStore::new()),
        );

        for name in [
            "checkin",
            "checkin_channels",
            "check_perms",
            "add_managers",
            "view_managers",
        ] {
            assert!(
                handler.registry.contains(name),
                "Missing handler for: {name}"
            );
        }
        assert_eq!(handler.registry.len(), 5);
    }
}
