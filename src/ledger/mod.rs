//! Rewards Ledger
//!
//! Owns per-user points balances, lifetime totals, loyalty tiers, and the
//! append-only action history. One ledger core serves every storefront
//! surface; the HTTP API and the broadcast channel are thin adapters over
//! the same module.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐     ┌───────────────┐     ┌──────────────────┐
//! │ UserRewardsAccount   │────►│ RewardsLedger │◄────│ RewardCatalog    │
//! │ (balance + history)  │     │ (orchestrator)│     │ (static rewards) │
//! └──────────────────────┘     └───────────────┘     └──────────────────┘
//!                                  │          │
//!                                  ▼          ▼
//!                          ┌──────────────┐ ┌──────────────────┐
//!                          │ AccountStore │ │ AccountBroadcast │
//!                          │ (persistence)│ │ (other surfaces) │
//!                          └──────────────┘ └──────────────────┘
//! ```
//!
//! ## Points Model
//!
//! - Accounts are created on first access with a 500-point welcome bonus
//! - Earning grows both the spendable balance and the lifetime total
//! - Redemption spends from the balance only; the balance never goes
//!   negative (underfunded redemptions are rejected, not clamped)
//! - Tier is recomputed from lifetime points on every earn

mod account;
mod manager;
mod referral;

pub use account::{ActionKind, LedgerError, RewardAction, Tier, UserRewardsAccount};
pub use manager::{ProgramRules, RewardsLedger};
pub use referral::{
    generate_referral_code, is_well_formed, REFERRAL_CODE_PREFIX, REFERRAL_CODE_SUFFIX_LEN,
};
