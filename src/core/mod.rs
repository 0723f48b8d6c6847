//! # Core Module
//!
//! Configuration and shared presentation helpers for the check-in bot.

pub mod config;
pub mod embeds;

// Re-export commonly used items
pub use config::Config;
pub use embeds::{managers_embed, session_embed, ACCENT_COLOR};
