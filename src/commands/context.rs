//! Shared context for command handlers

use std::sync::Arc;

use crate::features::checkin::SessionStore;
use crate::features::guilds::GuildRegistry;

/// Shared context for all command handlers
///
/// Contains the core services needed by command handlers:
/// - GuildRegistry for per-guild channels and manager sets
/// - SessionStore for active check-in sessions
#[derive(Clone)]
pub struct CommandContext {
    pub guilds: Arc<GuildRegistry>,
    pub sessions: Arc<SessionStore>,
}

impl CommandContext {
    /// Create a new CommandContext with the given services
    pub fn new(guilds: Arc<GuildRegistry>, sessions: Arc<SessionStore>) -> Self {
        Self { guilds, sessions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_clone() {
        // CommandContext should be Clone for sharing across handlers
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }
}
