//! Database Connection Pool using sqlx

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::database::accounts::AccountRepository;

pub struct DatabasePool {
    pool: PgPool,
    accounts: AccountRepository,
}

impl DatabasePool {
    pub async fn new(connection_string: &str) -> Result<Self, String> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(connection_string)
            .await
            .map_err(|e| format!("Failed to connect to PostgreSQL: {}", e))?;

        info!("Connected to PostgreSQL");

        let accounts = AccountRepository::new(pool.clone());

        Ok(Self { pool, accounts })
    }

    pub async fn init_schema(&self) -> Result<(), String> {
        info!("Initializing database schema...");

        sqlx::query("CREATE SCHEMA IF NOT EXISTS rewards")
            .execute(&self.pool)
            .await
            .map_err(|e| format!("Failed to create rewards schema: {}", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS rewards.accounts (
                user_id TEXT PRIMARY KEY,
                account JSONB NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to create accounts table: {}", e))?;

        info!("Database schema initialized");
        Ok(())
    }

    pub fn accounts(&self) -> &AccountRepository {
        &self.accounts
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
