pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::InMemoryAccountStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteAccountStore;
