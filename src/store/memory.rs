use super::{InsertOutcome, NewUser, User, UserStore};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process store keyed by email.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<InsertOutcome> {
        // Check and insert under one write guard.
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Ok(InsertOutcome::Conflict);
        }

        let id = Uuid::now_v7();
        users.insert(
            user.email.clone(),
            User {
                id,
                name: user.name,
                email: user.email,
                password: user.password,
                role: user.role,
            },
        );

        Ok(InsertOutcome::Created(id))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
