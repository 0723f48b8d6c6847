//! Admin command handlers
//!
//! Handles: checkin_channels, check_perms, add_managers, view_managers
//!
//! The manager commands are restricted to managers: administrators, holders
//! of a manager role, or explicit manager members. Channel setup and the
//! permission check are open to any member — a fresh guild has no managers
//! yet, and configuring channels is the bootstrap path.

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::id::{ChannelId, GuildId};
use serenity::model::permissions::Permissions;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::get_string_option;
use crate::core::embeds::managers_embed;
use crate::features::checkin::mentions::{channel_tokens, tokenize, CachedDirectory};

/// Permissions the bot needs to run a session in a channel.
const REQUIRED_PERMISSIONS: &[(Permissions, &str)] = &[
    (Permissions::VIEW_CHANNEL, "Read Messages"),
    (Permissions::SEND_MESSAGES, "Send Messages"),
    (Permissions::READ_MESSAGE_HISTORY, "Read Message History"),
];

/// Whether a command name is restricted to managers.
fn requires_manager(name: &str) -> bool {
    matches!(name, "add_managers" | "view_managers")
}

/// Display names of required permissions absent from `perms`.
fn missing_permission_names(perms: Permissions) -> Vec<&'static str> {
    REQUIRED_PERMISSIONS
        .iter()
        .filter(|(perm, _)| !perms.contains(*perm))
        .map(|(_, name)| *name)
        .collect()
}

/// Handler for guild configuration commands
pub struct AdminHandler;

#[async_trait]
impl SlashCommandHandler for AdminHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["checkin_channels", "check_perms", "add_managers", "view_managers"]
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

        if requires_manager(command.data.name.as_str()) && !self.is_manager(&ctx, guild_id, command)
        {
            return respond(
                serenity_ctx,
                command,
                "You do not have permission to use this command.",
            )
            .await;
        }

        match command.data.name.as_str() {
            "checkin_channels" => {
                self.handle_checkin_channels(&ctx, serenity_ctx, command, guild_id)
                    .await
            }
            "check_perms" => {
                self.handle_check_perms(&ctx, serenity_ctx, command, guild_id)
                    .await
            }
            "add_managers" => {
                self.handle_add_managers(&ctx, serenity_ctx, command, guild_id)
                    .await
            }
            "view_managers" => {
                self.handle_view_managers(&ctx, serenity_ctx, command, guild_id)
                    .await
            }
            _ => Ok(()),
        }
    }
}

impl AdminHandler {
    /// Whether the invoking member may use the setting commands.
    fn is_manager(
        &self,
        ctx: &CommandContext,
        guild_id: GuildId,
        command: &ApplicationCommandInteraction,
    ) -> bool {
        let member = match &command.member {
            Some(member) => member,
            None => return false,
        };
        let is_administrator = member
            .permissions
            .map(|perms| perms.administrator())
            .unwrap_or(false);
        ctx.guilds
            .is_manager(guild_id, command.user.id, &member.roles, is_administrator)
    }

    /// Handle /checkin_channels - replace the designated channels
    async fn handle_checkin_channels(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        guild_id: GuildId,
    ) -> Result<()> {
        let channels_str = get_string_option(&command.data.options, "channels")
            .ok_or_else(|| anyhow::anyhow!("Missing channels parameter"))?;

        // Keep only channels that actually belong to this guild
        let channels: Vec<ChannelId> = channel_tokens(&channels_str)
            .into_iter()
            .filter(|channel| {
                serenity_ctx
                    .cache
                    .guild_channel(*channel)
                    .map(|ch| ch.guild_id == guild_id)
                    .unwrap_or(false)
            })
            .collect();

        if channels.is_empty() {
            return respond(serenity_ctx, command, "No valid channels were mentioned.").await;
        }

        let listing = channels
            .iter()
            .map(|c| format!("<#{c}>"))
            .collect::<Vec<_>>()
            .join(", ");
        info!("Updated check-in channels for guild {guild_id}: {channels:?}");
        ctx.guilds.set_checkin_channels(guild_id, channels);

        respond(
            serenity_ctx,
            command,
            &format!("Check-in channels updated: {listing}"),
        )
        .await
    }

    /// Handle /check_perms - verify bot permissions in the invoking channel
    async fn handle_check_perms(
        &self,
        _ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        _guild_id: GuildId,
    ) -> Result<()> {
        let channel = match serenity_ctx.cache.guild_channel(command.channel_id) {
            Some(channel) => channel,
            None => {
                return respond(
                    serenity_ctx,
                    command,
                    "Server data is not available yet. Please try again in a moment.",
                )
                .await;
            }
        };

        let bot_id = serenity_ctx.cache.current_user_id();
        let perms = match channel.permissions_for_user(&serenity_ctx.cache, bot_id) {
            Ok(perms) => perms,
            Err(_) => {
                return respond(
                    serenity_ctx,
                    command,
                    "Server data is not available yet. Please try again in a moment.",
                )
                .await;
            }
        };

        let missing = missing_permission_names(perms);
        if missing.is_empty() {
            respond(serenity_ctx, command, "Bot has all necessary permissions.").await
        } else {
            respond(
                serenity_ctx,
                command,
                &format!("Missing permissions: {}", missing.join(", ")),
            )
            .await
        }
    }

    /// Handle /add_managers - grant manager access to mentioned roles/members
    async fn handle_add_managers(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        guild_id: GuildId,
    ) -> Result<()> {
        let mentions_str = get_string_option(&command.data.options, "mentions")
            .ok_or_else(|| anyhow::anyhow!("Missing mentions parameter"))?;

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

        let tokens = tokenize(&mentions_str);
        let (roles_added, members_added) = ctx.guilds.add_managers(guild_id, &tokens, &directory);
        info!(
            "Added {roles_added} manager roles and {members_added} manager members in guild {guild_id}"
        );

        respond(serenity_ctx, command, "Managers have been updated.").await
    }

    /// Handle /view_managers - list the current manager sets
    async fn handle_view_managers(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        guild_id: GuildId,
    ) -> Result<()> {
        let (roles, members) = ctx.guilds.managers(guild_id);

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message.set_embed(managers_embed(&roles, &members))
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
    fn test_admin_handler_commands() {
        let handler = AdminHandler;
        let names = handler.command_names();

        assert!(names.contains(&"checkin_channels"));
        assert!(names.contains(&"check_perms"));
        assert!(names.contains(&"add_managers"));
        assert!(names.contains(&"view_managers"));
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_required_permissions_cover_messaging() {
        let combined = REQUIRED_PERMISSIONS
            .iter()
            .fold(Permissions::empty(), |acc, (perm, _)| acc | *perm);
        assert!(combined.contains(Permissions::VIEW_CHANNEL));
        assert!(combined.contains(Permissions::SEND_MESSAGES));
        assert!(combined.contains(Permissions::READ_MESSAGE_HISTORY));
    }

    #[test]
    fn test_only_manager_commands_are_gated() {
        // Channel setup and the permission check must stay open to any
        // member, otherwise a fresh guild with no managers can never be
        // configured by non-administrators.
        assert!(!requires_manager("checkin_channels"));
        assert!(!requires_manager("check_perms"));
        assert!(requires_manager("add_managers"));
        assert!(requires_manager("view_managers"));
    }

    #[test]
    fn test_missing_permission_names() {
        let all = Permissions::VIEW_CHANNEL
            | Permissions::SEND_MESSAGES
            | Permissions::READ_MESSAGE_HISTORY;
        assert!(missing_permission_names(all).is_empty());

        assert_eq!(
            missing_permission_names(Permissions::empty()),
            vec!["Read Messages", "Send Messages", "Read Message History"]
        );

        let no_history = Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES;
        assert_eq!(
            missing_permission_names(no_history),
            vec!["Read Message History"]
        );
    }
}
