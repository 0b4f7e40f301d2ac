use async_trait::async_trait;

use crate::password;
use crate::types::User;
use crate::Result;

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up a user by its unique username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Look up a user by id
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Create a user. Fails with `Error::AccountExists` if the username is taken.
    async fn create(&self, username: &str, password_hash: &str) -> Result<User>;

    /// Returns the user only if `password` matches the stored hash
    async fn verify_password(&self, username: &str, password: &str) -> Result<Option<User>> {
        Ok(self
            .find_by_username(username)
            .await?
            .filter(|user| password::verify_password(&user.password_hash, password)))
    }
}
