mod repository;
#[cfg(test)]
pub mod memory;
pub use repository::AccountRepository;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::models::{Account, NewAccount, PersistenceError};

/// Connects to a PostgreSQL database with the given `db_url`, returning a connection pool for accessing it
pub async fn connect_sqlx(db_url: &str) -> Result<PgPool, PersistenceError> {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .idle_timeout(Duration::from_secs(30))
        .max_connections(32)
        .min_connections(4)
        .connect(db_url)
        .await?;
    Ok(pool)
}

pub struct PostgreDatabase {
    sqlx_db: PgPool,
}

impl PostgreDatabase {
    pub fn new(sqlx_db: PgPool) -> Self {
        PostgreDatabase { sqlx_db }
    }

    /// Creates the account table when it does not exist yet
    pub async fn migrate(&self) -> Result<(), PersistenceError> {
        sqlx::migrate!("./migrations").run(&self.sqlx_db).await?;
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for PostgreDatabase {
    async fn create(&self, account: &NewAccount) -> Result<Account, PersistenceError> {
        let mut tx = self.sqlx_db.begin().await?;
        let row = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO account (name, email, address, phone_number, date_joined)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, address, phone_number, date_joined
            "#,
        )
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.address)
        .bind(&account.phone_number)
        .bind(account.date_joined)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn find(&self, id: i32) -> Result<Option<Account>, PersistenceError> {
        let row = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, email, address, phone_number, date_joined
            FROM account
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.sqlx_db)
        .await?;
        Ok(row)
    }

    async fn all(&self) -> Result<Vec<Account>, PersistenceError> {
        let rows = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, name, email, address, phone_number, date_joined
            FROM account
            ORDER BY id
            "#,
        )
        .fetch_all(&self.sqlx_db)
        .await?;
        Ok(rows)
    }

    async fn update(&self, account: &Account) -> Result<Account, PersistenceError> {
        let mut tx = self.sqlx_db.begin().await?;
        let row = sqlx::query_as::<_, Account>(
            r#"
            UPDATE account
            SET name = $1,
                email = $2,
                address = $3,
                phone_number = $4,
                date_joined = $5
            WHERE id = $6
            RETURNING id, name, email, address, phone_number, date_joined
            "#,
        )
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.address)
        .bind(&account.phone_number)
        .bind(account.date_joined)
        .bind(account.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(PersistenceError::Missing(account.id))?;
        tx.commit().await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<(), PersistenceError> {
        let mut tx = self.sqlx_db.begin().await?;
        sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}
