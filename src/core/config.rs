//! Process configuration loaded from the environment.

use anyhow::{Context, Result};
use std::env;

/// Runtime configuration for the bot process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token used to authenticate the gateway connection.
    pub discord_token: String,
    /// Optional guild id for instant guild-scoped command registration.
    /// When unset, commands are registered globally.
    pub discord_guild_id: Option<String>,
    /// Log level filter, defaults to "info".
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let discord_token =
            env::var("DISCORD_BOT_TOKEN").context("DISCORD_BOT_TOKEN must be set")?;
        let discord_guild_id = env::var("DISCORD_GUILD_ID")
            .ok()
            .filter(|v| !v.is_empty());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        Ok(Self {
            discord_token,
            discord_guild_id,
            log_level,
        })
    }
}
