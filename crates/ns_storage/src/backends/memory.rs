use async_trait::async_trait;
use ns_core::{AccountStore, Error, Result, User};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryStore {
    users: Vec<User>,
    next_id: i64,
}

/// Accounts kept for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    store: RwLock<MemoryStore>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<User> {
        let mut store = self.store.write().await;
        if store.users.iter().any(|u| u.username == username) {
            return Err(Error::AccountExists(username.to_string()));
        }
        store.next_id += 1;
        let user = User {
            id: store.next_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        store.users.push(user.clone());
        Ok(user)
    }
}
