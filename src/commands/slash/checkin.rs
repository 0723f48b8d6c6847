//! # Checkin Command
//!
//! Start a check-in session with a cadence and a set of mentioned
//! participants.

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_checkin_command()]
}

fn create_checkin_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("checkin")
        .description("Start a check-in session with periodic reminders")
        .create_option(|option| {
            option
                .name("duration")
                .description("Reminder cadence, e.g. 45s, 5m, 2h")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("mentions")
                .description("Roles and members to include, e.g. @team @alice")
                .kind(CommandOptionType::String)
                .required(true)
        });
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_checkin_command() {
        let commands = create_commands();
        assert_eq!(commands.len(), 1);

        let checkin = &commands[0];
        let name = checkin.0.get("name").unwrap().as_str().unwrap();
        assert_eq!(name, "checkin");
    }
}
