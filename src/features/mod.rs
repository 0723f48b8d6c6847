// Features layer - all feature modules

pub mod checkin;
pub mod guilds;

pub use checkin::{ReminderScheduler, SessionStore};
pub use guilds::GuildRegistry;
