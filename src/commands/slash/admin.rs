//! # Admin Commands
//!
//! Guild configuration: designated check-in channels, permission checks
//! and manager administration.

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_checkin_channels_command(),
        create_check_perms_command(),
        create_add_managers_command(),
        create_view_managers_command(),
    ]
}

fn create_checkin_channels_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("checkin_channels")
        .description("Set the channels where check-in sessions may run")
        .create_option(|option| {
            option
                .name("channels")
                .description("Channel mentions, e.g. #standup #general")
                .kind(CommandOptionType::String)
                .required(true)
        });
    command
}

fn create_check_perms_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("check_perms")
        .description("Verify the bot's permissions in the check-in channels");
    command
}

fn create_add_managers_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("add_managers")
        .description("Grant roles and members access to setting commands")
        .create_option(|option| {
            option
                .name("mentions")
                .description("Role and member mentions to add as managers")
                .kind(CommandOptionType::String)
                .required(true)
        });
    command
}

fn create_view_managers_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("view_managers")
        .description("List the roles and members with manager access");
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_admin_commands() {
        let commands = create_commands();
        assert_eq!(commands.len(), 4);

        let names: Vec<String> = commands
            .iter()
            .map(|cmd| cmd.0.get("name").unwrap().as_str().unwrap().to_string())
            .collect();

        assert!(names.contains(&"checkin_channels".to_string()));
        assert!(names.contains(&"check_perms".to_string()));
        assert!(names.contains(&"add_managers".to_string()));
        assert!(names.contains(&"view_managers".to_string()));
    }
}
