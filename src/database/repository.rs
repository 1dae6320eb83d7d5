use async_trait::async_trait;

use crate::models::{Account, NewAccount, PersistenceError};

/// Storage operations for accounts. Each call is a unit of work of its own
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Inserts `account` and returns it with its assigned id
    async fn create(&self, account: &NewAccount) -> Result<Account, PersistenceError>;

    async fn find(&self, id: i32) -> Result<Option<Account>, PersistenceError>;

    /// Every stored account, ordered by id
    async fn all(&self) -> Result<Vec<Account>, PersistenceError>;

    /// Replaces all mutable fields of the row identified by `account.id`.
    /// Fails with [`PersistenceError::Missing`] when no such row exists
    async fn update(&self, account: &Account) -> Result<Account, PersistenceError>;

    /// Removes the row if it exists; deleting an unknown id is not an error
    async fn delete(&self, id: i32) -> Result<(), PersistenceError>;
}
