//! Embed builders for Discord responses
//!
//! Shared embed construction for session announcements and manager listings.

use serenity::builder::CreateEmbed;
use serenity::model::id::{RoleId, UserId};

use crate::features::checkin::SessionSnapshot;

/// Accent color used by all bot embeds.
pub const ACCENT_COLOR: u32 = 0x3498DB;

/// Build the session announcement embed: creator, cadence and participants.
pub fn session_embed(snapshot: &SessionSnapshot) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed.title("Check-in Session");
    embed.description("Progress updates");
    embed.color(ACCENT_COLOR);
    embed.field("Creator", format!("<@{}>", snapshot.creator), true);
    embed.field("Duration", format!("{} seconds", snapshot.duration_secs), true);
    embed.field("Participants", user_list(&snapshot.participants), false);
    embed
}

/// Build the manager listing embed for `/view_managers`.
pub fn managers_embed(roles: &[RoleId], members: &[UserId]) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed.title("Managers");
    embed.description("Roles and members who can use setting commands");
    embed.color(ACCENT_COLOR);
    embed.field("Roles", role_list(roles), false);
    embed.field("Members", user_list(members), false);
    embed
}

fn user_list(users: &[UserId]) -> String {
    if users.is_empty() {
        "None".to_string()
    } else {
        users
            .iter()
            .map(|u| format!("<@{u}>"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn role_list(roles: &[RoleId]) -> String {
    if roles.is_empty() {
        "None".to_string()
    } else {
        roles
            .iter()
            .map(|r| format!("<@&{r}>"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::checkin::SessionState;
    use chrono::Utc;
    use serenity::model::id::{ChannelId, GuildId};

    fn test_snapshot() -> SessionSnapshot {
        SessionSnapshot {
            guild_id: GuildId(1),
            channel_id: ChannelId(2),
            creator: UserId(100),
            duration_secs: 45,
            participants: vec![UserId(100), UserId(1)],
            created_at: Utc::now(),
            state: SessionState::Active,
        }
    }

    #[test]
    fn test_session_embed_builds_successfully() {
        // CreateEmbed is opaque — if it builds without panic, it's correct
        let _embed = session_embed(&test_snapshot());
    }

    #[test]
    fn test_managers_embed_builds_successfully() {
        let _embed = managers_embed(&[RoleId(10)], &[UserId(1)]);
        let _empty = managers_embed(&[], &[]);
    }

    #[test]
    fn test_list_formatting() {
        assert_eq!(user_list(&[]), "None");
        assert_eq!(user_list(&[UserId(1), UserId(2)]), "<@1>, <@2>");
        assert_eq!(role_list(&[]), "None");
        assert_eq!(role_list(&[RoleId(10)]), "<@&10>");
    }
}
