use clap::{Arg, ArgAction, Command, builder::ValueParser};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_LOG_JSON: &str = "log-json";

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("ACCOUNTS_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .arg(
            Arg::new(ARG_LOG_JSON)
                .long("log-json")
                .help("Emit logs as JSON lines instead of human-readable text")
                .env("ACCOUNTS_LOG_JSON")
                .global(true)
                .action(ArgAction::SetTrue),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_names_and_numbers() {
        let command = with_args(Command::new("test"));
        for (value, expected) in [("error", 0), ("WARN", 1), ("info", 2), ("5", 5)] {
            temp_env::with_var("ACCOUNTS_LOG_LEVEL", Some(value), || {
                let matches = command.clone().get_matches_from(vec!["test"]);
                assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(expected));
            });
        }
    }

    #[test]
    fn log_level_rejects_unknown() {
        temp_env::with_var("ACCOUNTS_LOG_LEVEL", Some("loud"), || {
            let result = with_args(Command::new("test")).try_get_matches_from(vec!["test"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn log_json_flag() {
        temp_env::with_var("ACCOUNTS_LOG_JSON", None::<&str>, || {
            let command = with_args(Command::new("test"));
            let matches = command.clone().get_matches_from(vec!["test"]);
            assert!(!matches.get_flag(ARG_LOG_JSON));

            let matches = command.get_matches_from(vec!["test", "--log-json"]);
            assert!(matches.get_flag(ARG_LOG_JSON));
        });
    }
}
