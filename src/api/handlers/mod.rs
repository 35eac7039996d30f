//! Route handlers for the account API.
//!
//! `signup` and `login` are the account endpoints; `health` and `root` are
//! operational.

pub mod health;
pub mod login;
pub mod root;
pub mod signup;
pub mod types;
