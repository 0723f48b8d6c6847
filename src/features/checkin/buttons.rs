//! Session control buttons
//!
//! Builders and parsers for the Join / Leave / End message components
//! attached to session announcements and reminders. Custom ids carry the
//! session id so component interactions can be routed back to the store.

use serenity::builder::CreateComponents;
use serenity::model::application::component::ButtonStyle;

use crate::features::checkin::sessions::SessionId;

pub const JOIN_BUTTON_PREFIX: &str = "checkin_join_";
pub const LEAVE_BUTTON_PREFIX: &str = "checkin_leave_";
pub const END_BUTTON_PREFIX: &str = "checkin_end_";

/// Which session control a component interaction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Join,
    Leave,
    End,
}

/// Build the Join / Leave / End action row for a session.
pub fn create_session_buttons(session: SessionId) -> CreateComponents {
    let mut components = CreateComponents::default();
    components.create_action_row(|row| {
        row.create_button(|b| {
            b.custom_id(format!("{JOIN_BUTTON_PREFIX}{session}"))
                .label("Join")
                .style(ButtonStyle::Success)
        })
        .create_button(|b| {
            b.custom_id(format!("{LEAVE_BUTTON_PREFIX}{session}"))
                .label("Leave")
                .style(ButtonStyle::Danger)
        })
        .create_button(|b| {
            b.custom_id(format!("{END_BUTTON_PREFIX}{session}"))
                .label("End")
                .style(ButtonStyle::Primary)
        })
    });
    components
}

/// Parse a component custom id into a session control, or `None` when the
/// id belongs to some other component.
pub fn parse_session_control(custom_id: &str) -> Option<(SessionControl, SessionId)> {
    let (control, raw) = if let Some(raw) = custom_id.strip_prefix(JOIN_BUTTON_PREFIX) {
        (SessionControl::Join, raw)
    } else if let Some(raw) = custom_id.strip_prefix(LEAVE_BUTTON_PREFIX) {
        (SessionControl::Leave, raw)
    } else if let Some(raw) = custom_id.strip_prefix(END_BUTTON_PREFIX) {
        (SessionControl::End, raw)
    } else {
        return None;
    };
    raw.parse().ok().map(|id| (control, SessionId::from_raw(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session_control() {
        assert_eq!(
            parse_session_control("checkin_join_4"),
            Some((SessionControl::Join, SessionId::from_raw(4)))
        );
        assert_eq!(
            parse_session_control("checkin_leave_0"),
            Some((SessionControl::Leave, SessionId::from_raw(0)))
        );
        assert_eq!(
            parse_session_control("checkin_end_17"),
            Some((SessionControl::End, SessionId::from_raw(17)))
        );
    }

    #[test]
    fn test_parse_session_control_rejects_foreign_ids() {
        assert_eq!(parse_session_control("other_button"), None);
        assert_eq!(parse_session_control("checkin_join_"), None);
        assert_eq!(parse_session_control("checkin_join_abc"), None);
        assert_eq!(parse_session_control(""), None);
    }

    #[test]
    fn test_create_session_buttons_builds() {
        // Builder must not panic and must contain the action row
        let components = create_session_buttons(SessionId::from_raw(9));
        assert_eq!(components.0.len(), 1);
    }
}
