//! TechTrove Rewards
//!
//! Loyalty rewards ledger for the TechTrove storefront: per-user points
//! balances, lifetime totals, loyalty tiers, reward redemption, and
//! referral codes, persisted through a pluggable account store.
//!
//! ## Module Structure
//!
//! ```text
//! src/
//! ├── lib.rs         - Crate root with re-exports
//! ├── main.rs        - Server entrypoint
//! ├── config.rs      - Configuration management
//! ├── catalog.rs     - Static reward & earn-action catalogs
//! ├── ledger/        - Rewards ledger core
//! │   ├── account.rs  - Accounts, actions, tiers
//! │   ├── manager.rs  - Ledger orchestrator (earn/redeem/referral)
//! │   └── referral.rs - Referral code generation & validation
//! ├── store/         - Injected persistence (in-memory | PostgreSQL)
//! ├── database/      - PostgreSQL pool & account repository
//! ├── notify/        - Cross-surface account broadcast
//! └── api/           - HTTP API endpoints
//!     ├── rewards.rs - Account reads, earn, redeem, referral
//!     └── catalog.rs - Static reference data
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod database;
pub mod ledger;
pub mod notify;
pub mod store;

// Re-export main types for convenience
pub use api::{create_catalog_router, create_rewards_router, CatalogApiState, RewardsApiState};
pub use catalog::{EarnActionDefinition, RewardCatalog, RewardCatalogEntry, RewardKind};
pub use config::RewardsConfig;
pub use database::{AccountRepository, DatabasePool};
pub use ledger::{
    ActionKind, LedgerError, ProgramRules, RewardAction, RewardsLedger, Tier, UserRewardsAccount,
};
pub use notify::AccountBroadcast;
pub use store::{AccountStore, MemoryStore};
