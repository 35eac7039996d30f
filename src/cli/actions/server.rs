use crate::{
    api::{self, CorsPolicy},
    store::{MemoryUserStore, PgUserStore, UserStore},
};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{info, warn};

/// Where user records live.
#[derive(Debug)]
pub enum StoreBackend {
    Postgres { dsn: SecretString },
    /// Process-local store; everything is lost on exit.
    Memory,
}

impl StoreBackend {
    /// `memory://` selects the in-process store, anything else is a Postgres DSN.
    #[must_use]
    pub fn from_dsn(dsn: String) -> Self {
        if dsn.starts_with("memory:") {
            Self::Memory
        } else {
            Self::Postgres {
                dsn: SecretString::from(dsn),
            }
        }
    }
}

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub store: StoreBackend,
    pub cors: CorsPolicy,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable, the schema cannot be
/// applied, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    info!(port = args.port, cors = ?args.cors, "starting accounts server");

    let store: Arc<dyn UserStore> = match args.store {
        StoreBackend::Postgres { dsn } => {
            let store = PgUserStore::connect(dsn.expose_secret()).await?;
            store.ensure_schema().await?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            warn!("using in-memory user store; accounts will not survive a restart");
            Arc::new(MemoryUserStore::new())
        }
    };

    api::new(args.port, store, &args.cors).await
}
