//! Map validated CLI arguments to the action the binary runs.

use crate::{
    api::CorsPolicy,
    cli::{
        actions::{
            Action,
            server::{Args, StoreBackend},
        },
        commands::{ARG_CORS_ALLOWED_ORIGINS, ARG_DSN, ARG_PORT},
    },
};
use anyhow::{Context, Result};

/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;
    let cors = matches
        .get_one::<String>(ARG_CORS_ALLOWED_ORIGINS)
        .map_or(Ok(CorsPolicy::Permissive), |origins| {
            CorsPolicy::parse(origins)
        })
        .context("invalid --cors-allowed-origins")?;

    Ok(Action::Server(Args {
        port,
        store: StoreBackend::from_dsn(dsn),
        cors,
    }))
}
