//! Per-command handler implementations

pub mod admin;
pub mod checkin;

use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![Arc::new(checkin::CheckinHandler), Arc::new(admin::AdminHandler)]
}
