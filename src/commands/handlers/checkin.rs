//! Check-in session command handler
//!
//! Handles: checkin

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::get_string_option;
use crate::core::embeds::session_embed;
use crate::features::checkin::buttons::create_session_buttons;
use crate::features::checkin::mentions::CachedDirectory;
use crate::features::checkin::scheduler::{DiscordSink, ReminderScheduler};

/// Handler for the checkin command
pub struct CheckinHandler;

#[async_trait]
impl SlashCommandHandler for CheckinHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["checkin"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let guild_id = match command.guild_id {
            Some(id) => id,
            None => {
                return respond(serenity_ctx, command, "This command can only be used in a server.")
                    .await;
            }
        };

        let duration_str = get_string_option(&command.data.options, "duration")
            .ok_or_else(|| anyhow::anyhow!("Missing duration parameter"))?;
        let mentions_str =
            get_string_option(&command.data.options, "mentions").unwrap_or_default();

        let directory = match CachedDirectory::from_cache(&serenity_ctx.cache, guild_id) {
            Some(directory) => directory,
            None => {
                return respond(
                    serenity_ctx,
                    command,
                    "Server data is not available yet. Please try again in a moment.",
                )
                .await;
            }
        };

        let id = match ctx.sessions.create(
            &ctx.guilds,
            &directory,
            guild_id,
            command.channel_id,
            command.user.id,
            &duration_str,
            &mentions_str,
        ) {
            Ok(id) => id,
            Err(e) => return respond(serenity_ctx, command, &e.to_string()).await,
        };

        let snapshot = ctx
            .sessions
            .snapshot(id)
            .ok_or_else(|| anyhow::anyhow!("Session {id} vanished before announcement"))?;

        info!(
            "Started check-in session {} in guild {} ({} participants, every {}s)",
            id,
            guild_id,
            snapshot.participants.len(),
            snapshot.duration_secs
        );

        let scheduler = ReminderScheduler::new(
            Arc::clone(&ctx.sessions),
            Arc::new(DiscordSink::new(serenity_ctx.http.clone())),
        );
        scheduler.start(id);

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message
                            .content(format!("Check-in session started for {duration_str}!"))
                            .set_embed(session_embed(&snapshot))
                            .set_components(create_session_buttons(id))
                    })
            })
            .await?;

        Ok(())
    }
}

async fn respond(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    content: &str,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(content))
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkin_handler_commands() {
        let handler = CheckinHandler;
        assert_eq!(handler.command_names(), &["checkin"]);
    }
}
