use colored::*;

use crate::config::LoggingSettings;
use crate::utils::random::random_index;

const MESSAGES: [(&str, &str); 6] = [
        ("The surface has been handed back to the compositor.", "cyan"),
        ("Last frame presented. The swapchain rests.", "green"),
        ("The engine stepped its final step.", "yellow"),
        ("Surface destroyed, no further callbacks will be delivered.", "magenta"),
        ("Context released. Nothing left to draw on.", "blue"),
        ("The display went dark on schedule.", "bright red"),
];

pub fn get_exit_message(settings: &LoggingSettings) -> String
{
        if !settings.show_exit_message
        {
                return String::new();
        }

        let (message, color) = MESSAGES[random_index(MESSAGES.len())];

        match color
        {
                "cyan" => message.cyan().to_string(),
                "green" => message.green().to_string(),
                "yellow" => message.yellow().to_string(),
                "magenta" => message.magenta().to_string(),
                "blue" => message.blue().to_string(),
                "bright red" => message.bright_red().to_string(),
                _ => message.to_string(),
        }
}

pub fn show_exit_message(settings: &LoggingSettings)
{
        let message = get_exit_message(settings);

        if !message.is_empty()
        {
                log::info!("{message}");
        }
}
