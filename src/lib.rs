// Core layer - configuration and shared presentation helpers
pub mod core;

// Features layer - all feature modules
pub mod features;

// UI components
pub mod message_components;

// Application layer
pub mod command_handler;
pub mod commands;

// Re-export core config
pub use core::Config;

// Re-export feature items
pub use features::{
    // Check-in sessions
    checkin::{ReminderScheduler, SessionId, SessionStore},
    // Guild configuration
    guilds::GuildRegistry,
};
