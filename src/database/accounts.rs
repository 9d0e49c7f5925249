//! Account Repository - PostgreSQL operations for rewards accounts using sqlx
//!
//! Accounts are stored whole as one JSONB document per user key, matching
//! the ledger's read-modify-write access pattern. The last write for a
//! user key wins.

use sqlx::{PgPool, Row};
use tracing::debug;

use crate::ledger::UserRewardsAccount;

pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: &str) -> Result<Option<UserRewardsAccount>, String> {
        let row = sqlx::query("SELECT account FROM rewards.accounts WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| format!("Failed to load account: {}", e))?;

        match row {
            Some(row) => {
                let value: serde_json::Value = row.get("account");
                let account = serde_json::from_value(value)
                    .map_err(|e| format!("Failed to decode account: {}", e))?;
                Ok(Some(account))
            }
            None => Ok(None),
        }
    }

    pub async fn upsert(&self, account: &UserRewardsAccount) -> Result<(), String> {
        let value = serde_json::to_value(account)
            .map_err(|e| format!("Failed to encode account: {}", e))?;

        sqlx::query(
            r#"
            INSERT INTO rewards.accounts (user_id, account, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id) DO UPDATE SET account = $2, updated_at = NOW()
            "#,
        )
        .bind(&account.user_id)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to persist account: {}", e))?;

        debug!(user_id = %account.user_id, total_points = account.total_points, "Account persisted");
        Ok(())
    }
}
