use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::AccountRepository;
use crate::models::{Account, NewAccount, PersistenceError};

/// Process-local account store used to exercise the HTTP layer without PostgreSQL
#[derive(Default)]
pub struct InMemoryDatabase {
    inner: Mutex<Rows>,
}

#[derive(Default)]
struct Rows {
    last_id: i32,
    accounts: BTreeMap<i32, Account>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryDatabase {
    async fn create(&self, account: &NewAccount) -> Result<Account, PersistenceError> {
        let mut rows = self.inner.lock().unwrap();
        rows.last_id += 1;
        let account = account.clone().with_id(rows.last_id);
        rows.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find(&self, id: i32) -> Result<Option<Account>, PersistenceError> {
        Ok(self.inner.lock().unwrap().accounts.get(&id).cloned())
    }

    async fn all(&self) -> Result<Vec<Account>, PersistenceError> {
        Ok(self.inner.lock().unwrap().accounts.values().cloned().collect())
    }

    async fn update(&self, account: &Account) -> Result<Account, PersistenceError> {
        let mut rows = self.inner.lock().unwrap();
        match rows.accounts.get_mut(&account.id) {
            Some(row) => {
                *row = account.clone();
                Ok(account.clone())
            }
            None => Err(PersistenceError::Missing(account.id)),
        }
    }

    async fn delete(&self, id: i32) -> Result<(), PersistenceError> {
        self.inner.lock().unwrap().accounts.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn new_account(name: &str) -> NewAccount {
        NewAccount {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            address: "1 Main".to_string(),
            phone_number: "555-1212".to_string(),
            date_joined: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let db = InMemoryDatabase::new();
        let first = db.create(&new_account("Ann")).await.unwrap();
        let second = db.create(&new_account("Bob")).await.unwrap();
        assert!(second.id > first.id);
        assert_eq!(db.find(first.id).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let db = InMemoryDatabase::new();
        let first = db.create(&new_account("Ann")).await.unwrap();
        db.delete(first.id).await.unwrap();
        let second = db.create(&new_account("Bob")).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(db.find(first.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_of_missing_row_fails() {
        let db = InMemoryDatabase::new();
        let ghost = new_account("Ghost").with_id(41);
        assert!(matches!(
            db.update(&ghost).await,
            Err(PersistenceError::Missing(41))
        ));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let db = InMemoryDatabase::new();
        db.delete(5).await.unwrap();
        db.delete(5).await.unwrap();
        assert!(db.all().await.unwrap().is_empty());
    }
}
