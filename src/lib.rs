//! # Accounts
//!
//! `accounts` is a small user-account backend. It exposes two JSON endpoints:
//!
//! - `POST /signup` registers a user (`name`, `email`, `password`, `role`).
//!   The email must not already be registered. The password is hashed with
//!   Argon2id before it reaches the store; the plaintext is never persisted.
//! - `POST /login` verifies an email/password pair and returns the user's
//!   public profile (`name`, `email`, `role`). No token or session is issued.
//!
//! Unknown emails and wrong passwords produce the same `400 Invalid credentials`
//! response so callers cannot probe for registered accounts.
//!
//! ## Storage
//!
//! Users live in a `PostgreSQL` `users` table (see `sql/schema.sql`). The store
//! is reached through the [`store::UserStore`] trait and handed to handlers
//! explicitly at router construction time; there is no global connection state.

pub mod api;
pub mod cli;
pub mod password;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
