//! # Check-in Feature
//!
//! Periodic check-in sessions: a creator starts a session in a designated
//! channel with a cadence and a set of mentioned participants, the bot
//! posts reminder messages on that cadence, and participants join, leave
//! or end the session through message buttons.

pub mod buttons;
pub mod duration;
pub mod mentions;
pub mod scheduler;
pub mod sessions;

pub use buttons::{create_session_buttons, parse_session_control, SessionControl};
pub use duration::{parse_duration, MIN_DURATION_SECS};
pub use mentions::{CachedDirectory, MemberDirectory, MentionToken};
pub use scheduler::{DiscordSink, ReminderScheduler, ReminderSink, PROGRESS_PROMPTS};
pub use sessions::{
    CreateSessionError, EndOutcome, JoinOutcome, LeaveOutcome, SessionId, SessionSnapshot,
    SessionState, SessionStore,
};
