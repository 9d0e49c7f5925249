//! Rewards Account Types and Tier Thresholds
//!
//! Balance starts with a welcome bonus and grows with earn actions.
//! Redemptions spend from the balance only; lifetime points never decrease.
//! Loyalty tier is derived from lifetime points on every earn.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::catalog::RewardCatalogEntry;
use crate::ledger::referral::generate_referral_code;

/// Loyalty tier, a pure function of lifetime points earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    /// Lifetime points at which Silver begins (inclusive).
    pub const SILVER_MIN: u64 = 2_000;
    /// Lifetime points at which Gold begins (inclusive).
    pub const GOLD_MIN: u64 = 5_000;
    /// Lifetime points at which Platinum begins (inclusive).
    pub const PLATINUM_MIN: u64 = 10_000;

    /// Tier for a lifetime points total, evaluated highest-first.
    /// Boundaries are inclusive on the lower bound of each tier
    /// (exactly 2000 is Silver, not Bronze).
    pub fn for_lifetime_points(lifetime_points: u64) -> Self {
        if lifetime_points >= Self::PLATINUM_MIN {
            Tier::Platinum
        } else if lifetime_points >= Self::GOLD_MIN {
            Tier::Gold
        } else if lifetime_points >= Self::SILVER_MIN {
            Tier::Silver
        } else {
            Tier::Bronze
        }
    }

    /// Human-readable tier name
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
        }
    }
}

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Increases balance and lifetime points
    Earn,
    /// Decreases balance only, recording a reward claim
    Redeem,
}

/// One entry in the account history log. Immutable once created; history
/// is never edited, only prepended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardAction {
    /// Unique ID for this entry
    pub id: Uuid,

    /// Earn or Redeem
    pub kind: ActionKind,

    /// Human-readable action or reward name
    pub label: String,

    /// Positive magnitude of the balance change
    pub points: u64,

    /// When the entry was created
    pub timestamp: DateTime<Utc>,

    /// Free-text note
    pub description: String,
}

impl RewardAction {
    pub fn earn(label: &str, points: u64, description: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ActionKind::Earn,
            label: label.to_string(),
            points,
            timestamp: Utc::now(),
            description: description.to_string(),
        }
    }

    pub fn redeem(label: &str, points: u64, description: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ActionKind::Redeem,
            label: label.to_string(),
            points,
            timestamp: Utc::now(),
            description: description.to_string(),
        }
    }
}

/// Per-user rewards account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRewardsAccount {
    pub user_id: String,

    /// Current redeemable balance
    pub total_points: u64,

    /// Sum of all earn magnitudes ever applied, unaffected by redemption
    pub lifetime_points: u64,

    /// Always consistent with `lifetime_points`, recomputed on every earn
    pub tier: Tier,

    /// History log, newest first
    pub actions: Vec<RewardAction>,

    /// Shareable code generated at creation
    pub referral_code: String,

    /// Number of accounts that joined through this account's code
    pub referral_count: u32,

    /// Timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRewardsAccount {
    /// Create a fresh account seeded with the sign-up welcome bonus.
    pub fn new(user_id: String, welcome_bonus_points: u64) -> Self {
        let now = Utc::now();
        let mut account = Self {
            user_id,
            total_points: 0,
            lifetime_points: 0,
            tier: Tier::Bronze,
            actions: Vec::new(),
            referral_code: generate_referral_code(),
            referral_count: 0,
            created_at: now,
            updated_at: now,
        };
        account.apply_earn(
            "Sign up",
            welcome_bonus_points,
            "Welcome bonus for joining TechTrove Rewards",
        );
        account
    }

    /// Apply an earn: prepend the history entry, grow both balances, and
    /// recompute the tier from the new lifetime total.
    pub fn apply_earn(&mut self, label: &str, points: u64, description: &str) {
        self.actions
            .insert(0, RewardAction::earn(label, points, description));
        self.total_points += points;
        self.lifetime_points += points;
        self.tier = Tier::for_lifetime_points(self.lifetime_points);
        self.updated_at = Utc::now();
    }

    /// Apply a redemption. Fails with `InsufficientPoints` and leaves the
    /// account untouched when the balance cannot cover the reward cost.
    /// Lifetime points and tier are unaffected by redemption.
    pub fn apply_redeem(&mut self, reward: &RewardCatalogEntry) -> Result<(), LedgerError> {
        if self.total_points < reward.cost_points {
            return Err(LedgerError::InsufficientPoints {
                required: reward.cost_points,
                available: self.total_points,
            });
        }

        self.total_points -= reward.cost_points;
        self.actions.insert(
            0,
            RewardAction::redeem(
                &reward.name,
                reward.cost_points,
                &format!("Redeemed: {}", reward.description),
            ),
        );
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Errors surfaced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Redemption attempted with a balance below the reward cost
    InsufficientPoints { required: u64, available: u64 },

    /// Earn attempted with a zero point amount
    InvalidPoints,

    /// Account operations require a non-empty user id
    EmptyUserId,

    /// Submitted referral code does not match the issued-code shape
    InvalidReferralCode,

    /// Underlying account store failure
    Storage(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::InsufficientPoints {
                required,
                available,
            } => write!(
                f,
                "insufficient points: reward costs {} but balance is {}",
                required, available
            ),
            LedgerError::InvalidPoints => write!(f, "points must be a positive integer"),
            LedgerError::EmptyUserId => write!(f, "user id must be non-empty"),
            LedgerError::InvalidReferralCode => write!(f, "referral code is not well-formed"),
            LedgerError::Storage(msg) => write!(f, "account store failure: {}", msg),
        }
    }
}

impl std::error::Error for LedgerError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RewardCatalogEntry, RewardKind};

    fn coupon(cost: u64) -> RewardCatalogEntry {
        RewardCatalogEntry {
            id: "coupon-5".to_string(),
            name: "$5 Off Coupon".to_string(),
            description: "$5 off any order".to_string(),
            cost_points: cost,
            kind: RewardKind::Coupon,
            value: "$5".to_string(),
            icon: "ticket".to_string(),
        }
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(Tier::for_lifetime_points(0), Tier::Bronze);
        assert_eq!(Tier::for_lifetime_points(1_999), Tier::Bronze);
        assert_eq!(Tier::for_lifetime_points(2_000), Tier::Silver);
        assert_eq!(Tier::for_lifetime_points(4_999), Tier::Silver);
        assert_eq!(Tier::for_lifetime_points(5_000), Tier::Gold);
        assert_eq!(Tier::for_lifetime_points(9_999), Tier::Gold);
        assert_eq!(Tier::for_lifetime_points(10_000), Tier::Platinum);
    }

    #[test]
    fn test_new_account_welcome_bonus() {
        let account = UserRewardsAccount::new("user_1".to_string(), 500);

        assert_eq!(account.total_points, 500);
        assert_eq!(account.lifetime_points, 500);
        assert_eq!(account.tier, Tier::Bronze);
        assert_eq!(account.actions.len(), 1);
        assert_eq!(account.actions[0].kind, ActionKind::Earn);
        assert_eq!(account.actions[0].label, "Sign up");
        assert_eq!(account.referral_count, 0);
    }

    #[test]
    fn test_earn_updates_balances_and_tier() {
        let mut account = UserRewardsAccount::new("user_1".to_string(), 500);

        account.apply_earn("Place an order", 200, "Order #1042");
        assert_eq!(account.total_points, 700);
        assert_eq!(account.lifetime_points, 700);
        assert_eq!(account.tier, Tier::Bronze);
        assert_eq!(account.actions.len(), 2);
        assert_eq!(account.actions[0].label, "Place an order");

        account.apply_earn("Place an order", 1_300, "Order #1043");
        assert_eq!(account.lifetime_points, 2_000);
        assert_eq!(account.tier, Tier::Silver);
    }

    #[test]
    fn test_redeem_spends_balance_only() {
        let mut account = UserRewardsAccount::new("user_1".to_string(), 500);
        account.apply_earn("Place an order", 200, "Order #1042");

        account.apply_redeem(&coupon(500)).unwrap();

        assert_eq!(account.total_points, 200);
        assert_eq!(account.lifetime_points, 700);
        assert_eq!(account.actions.len(), 3);
        assert_eq!(account.actions[0].kind, ActionKind::Redeem);
        assert_eq!(account.actions[0].points, 500);
        assert_eq!(account.actions[0].description, "Redeemed: $5 off any order");
    }

    #[test]
    fn test_redeem_insufficient_leaves_account_unchanged() {
        let mut account = UserRewardsAccount::new("user_1".to_string(), 500);
        let before = account.clone();

        let err = account.apply_redeem(&coupon(2_500)).unwrap_err();

        assert_eq!(
            err,
            LedgerError::InsufficientPoints {
                required: 2_500,
                available: 500
            }
        );
        assert_eq!(account, before);
    }
}
