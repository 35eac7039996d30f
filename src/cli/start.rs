use crate::cli::{
    actions::Action,
    commands::{
        self,
        logging::{ARG_LOG_JSON, ARG_VERBOSITY},
    },
    dispatch::handler,
    telemetry,
};
use anyhow::Result;
use tracing::Level;

#[must_use]
pub fn get_verbosity_level(verbosity: u8) -> Option<Level> {
    match verbosity {
        0 => None,
        1 => Some(Level::WARN),
        2 => Some(Level::INFO),
        3 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

/// Start the CLI
/// # Errors
/// Returns an error if logging cannot be initialized or arguments are invalid
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    let verbosity_level = get_verbosity_level(
        matches
            .get_one::<u8>(ARG_VERBOSITY)
            .copied()
            .unwrap_or(0),
    );

    telemetry::init(verbosity_level, matches.get_flag(ARG_LOG_JSON))?;

    let action = handler(&matches)?;

    Ok(action)
}
