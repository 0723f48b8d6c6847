use anyhow::Result;
use log::info;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::features::checkin::buttons::{parse_session_control, SessionControl};
use crate::features::checkin::sessions::{
    EndOutcome, JoinOutcome, LeaveOutcome, SessionId, SessionStore,
};

const SESSION_GONE: &str = "This check-in session is no longer active.";

/// Handler for all message component interactions
pub struct MessageComponentHandler {
    sessions: Arc<SessionStore>,
}

impl MessageComponentHandler {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }

    /// Handle all types of component interactions
    pub async fn handle_component_interaction(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<()> {
        let custom_id = &interaction.data.custom_id;
        info!(
            "Processing component interaction: {custom_id} from user: {}",
            interaction.user.id
        );

        match parse_session_control(custom_id) {
            Some((SessionControl::Join, id)) => self.handle_join(ctx, interaction, id).await,
            Some((SessionControl::Leave, id)) => self.handle_leave(ctx, interaction, id).await,
            Some((SessionControl::End, id)) => self.handle_end(ctx, interaction, id).await,
            None => {
                respond_ephemeral(ctx, interaction, "Unknown component interaction.").await
            }
        }
    }

    async fn handle_join(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
        id: SessionId,
    ) -> Result<()> {
        let content = match self.sessions.join(id, interaction.user.id) {
            Some(JoinOutcome::Joined) => "You have now joined the check-in session.",
            Some(JoinOutcome::AlreadyJoined) => "You have already joined the check-in session.",
            None => SESSION_GONE,
        };
        respond_ephemeral(ctx, interaction, content).await
    }

    async fn handle_leave(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
        id: SessionId,
    ) -> Result<()> {
        let content = match self.sessions.leave(id, interaction.user.id) {
            Some(LeaveOutcome::Left) => "You have left the check-in session.",
            Some(LeaveOutcome::NotParticipant) => "You are not part of the check-in session.",
            None => SESSION_GONE,
        };
        respond_ephemeral(ctx, interaction, content).await
    }

    async fn handle_end(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
        id: SessionId,
    ) -> Result<()> {
        match self.sessions.end(id, interaction.user.id) {
            EndOutcome::Ended { channel } => {
                info!("Session {id} ended by user {}", interaction.user.id);
                respond_ephemeral(ctx, interaction, "You have ended the check-in session.").await?;
                // Announce in the session channel so all participants see it
                channel
                    .say(&ctx.http, "The check-in session has now ended.")
                    .await?;
                Ok(())
            }
            EndOutcome::NotParticipant => {
                respond_ephemeral(ctx, interaction, "You are not part of the check-in session.")
                    .await
            }
            EndOutcome::Gone => respond_ephemeral(ctx, interaction, SESSION_GONE).await,
        }
    }
}

async fn respond_ephemeral(
    ctx: &Context,
    interaction: &MessageComponentInteraction,
    content: &str,
) -> Result<()> {
    interaction
        .create_interaction_response(&ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(content).ephemeral(true))
        })
        .await?;
    Ok(())
}
