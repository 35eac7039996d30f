//! User persistence.
//!
//! Handlers only talk to the [`UserStore`] trait. Production uses
//! [`PgUserStore`]; [`MemoryUserStore`] keeps everything in process and is
//! meant for local runs and tests.

pub mod memory;
pub mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// A persisted account. `password` holds the Argon2id digest, never plaintext.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// Fields required to create an account; `password` must already be hashed.
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Outcome of an insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Created(Uuid),
    /// Another account already owns the email.
    Conflict,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by exact email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Persist a new user. Email uniqueness is enforced here as well as by
    /// the caller's pre-check, so concurrent signups cannot both succeed.
    async fn insert(&self, user: NewUser) -> Result<InsertOutcome>;

    /// Cheap liveness probe used by `/health`.
    async fn ping(&self) -> Result<()>;
}
