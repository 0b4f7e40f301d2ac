use std::path::Path;
use std::sync::Arc;

use ns_core::{AccountStore, Error, Result};
use tracing::info;

pub mod backends;

pub use backends::*;

/// Default location of the SQLite account database.
pub const DEFAULT_DATABASE_PATH: &str = "users.db";

/// Open the account store named by `kind` (`memory` or `sqlite`).
pub async fn create_account_store(kind: &str, database: Option<&Path>) -> Result<Arc<dyn AccountStore>> {
    match kind {
        "memory" => {
            info!("🗃️ Using in-memory account store");
            Ok(Arc::new(InMemoryAccountStore::new()))
        }
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let path = database.unwrap_or_else(|| Path::new(DEFAULT_DATABASE_PATH));
            let store = SqliteAccountStore::new_with_path(path).await?;
            info!("🗃️ Using SQLite account store at {}", path.display());
            Ok(Arc::new(store))
        }
        other => {
            let _ = database;
            Err(Error::Storage(format!("Unsupported account store: {}", other)))
        }
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::create_account_store;
    pub use ns_core::{AccountStore, User};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_memory_store() {
        let store = create_account_store("memory", None).await.unwrap();
        assert!(store.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_store_kind() {
        assert!(matches!(
            create_account_store("postgres", None).await,
            Err(Error::Storage(_))
        ));
    }
}
