//! Account Store
//!
//! Key-value persistence for rewards accounts, keyed by user id, injected
//! into the ledger at construction. Two backends: a process-local
//! in-memory map (the default) and PostgreSQL. Writes are last-write-wins
//! per user key; concurrent writers for the same user are not coordinated.

use dashmap::DashMap;
use std::sync::Arc;

use crate::database::DatabasePool;
use crate::ledger::{LedgerError, UserRewardsAccount};

/// In-memory account store. Process-local, lost on restart.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    accounts: Arc<DashMap<String, UserRewardsAccount>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Persistence backend for rewards accounts.
#[derive(Clone)]
pub enum AccountStore {
    Memory(MemoryStore),
    Postgres(Arc<DatabasePool>),
}

impl AccountStore {
    pub fn memory() -> Self {
        AccountStore::Memory(MemoryStore::new())
    }

    pub fn postgres(db: Arc<DatabasePool>) -> Self {
        AccountStore::Postgres(db)
    }

    /// Load the persisted account for a user, if any.
    pub async fn get(&self, user_id: &str) -> Result<Option<UserRewardsAccount>, LedgerError> {
        match self {
            AccountStore::Memory(store) => {
                Ok(store.accounts.get(user_id).map(|entry| entry.value().clone()))
            }
            AccountStore::Postgres(db) => db
                .accounts()
                .get(user_id)
                .await
                .map_err(LedgerError::Storage),
        }
    }

    /// Persist the account under its user id, replacing any previous value.
    pub async fn put(&self, account: &UserRewardsAccount) -> Result<(), LedgerError> {
        match self {
            AccountStore::Memory(store) => {
                store
                    .accounts
                    .insert(account.user_id.clone(), account.clone());
                Ok(())
            }
            AccountStore::Postgres(db) => db
                .accounts()
                .upsert(account)
                .await
                .map_err(LedgerError::Storage),
        }
    }
}
