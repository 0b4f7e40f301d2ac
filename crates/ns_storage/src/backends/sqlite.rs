use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ns_core::{AccountStore, Error, Result, User};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    )
    "#,
    // Add future migrations here
];

#[derive(Debug, Clone)]
pub struct SqliteAccountStore {
    pool: SqlitePool,
    db_path: PathBuf,
}

impl SqliteAccountStore {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| Error::Database(format!("Failed to connect to database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Database(format!("Failed to run migration {}: {}", i, e)))?;
        }

        Ok(Self {
            pool,
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }
}

fn user_from_row(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password"),
    }
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, username, password FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to look up user: {}", e)))?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, username, password FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to load user {}: {}", id, e)))?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db) if db.is_unique_violation() => Error::AccountExists(username.to_string()),
                _ => Error::Database(format!("Failed to create user: {}", e)),
            })?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_core::password::hash_password;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_sqlite_accounts() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("users.db");

        let store = SqliteAccountStore::new_with_path(&db_path).await.unwrap();
        assert!(db_path.exists());

        let user = store.create("alice", &hash_password("wonderland")).await.unwrap();
        assert_eq!(store.find_by_username("alice").await.unwrap(), Some(user.clone()));
        assert_eq!(store.find_by_id(user.id).await.unwrap(), Some(user));
        assert!(store.find_by_username("bob").await.unwrap().is_none());

        let duplicate = store.create("alice", "other").await;
        assert!(matches!(duplicate, Err(Error::AccountExists(_))));

        assert!(store.verify_password("alice", "wonderland").await.unwrap().is_some());
        assert!(store.verify_password("alice", "looking-glass").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sqlite_accounts_survive_reopen() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("users.db");

        {
            let store = SqliteAccountStore::new_with_path(&db_path).await.unwrap();
            store.create("carol", &hash_password("pw")).await.unwrap();
            store.pool.close().await;
        }

        let reopened = SqliteAccountStore::new_with_path(&db_path).await.unwrap();
        assert_eq!(reopened.get_db_path(), db_path.as_path());
        let carol = reopened.find_by_username("carol").await.unwrap().unwrap();
        assert!(carol.password_hash.starts_with("sha256$"));
    }
}
