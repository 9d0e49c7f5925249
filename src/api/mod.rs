//! HTTP API Endpoints
//!
//! Thin presentation adapters over the ledger core. The in-page storefront
//! and the rewards popup are both clients of the same routes.

pub mod catalog;
pub mod rewards;

pub use catalog::{create_catalog_router, CatalogApiState};
pub use rewards::{create_rewards_router, RewardsApiState};
