//! Rewards Ledger - Main Orchestrator
//!
//! Coordinates account lifecycle, point accrual, redemptions, and referral
//! credits. Every mutation is an atomic read-modify-write against the
//! injected account store, persisted before the updated account is
//! broadcast to other surfaces and returned.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::catalog::RewardCatalogEntry;
use crate::ledger::referral::is_well_formed;
use crate::ledger::{LedgerError, UserRewardsAccount};
use crate::notify::AccountBroadcast;
use crate::store::AccountStore;

/// Point amounts granted by the rewards program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramRules {
    /// Points granted by the sign-up earn action on account creation
    pub welcome_bonus_points: u64,

    /// Points granted to the redeeming account for a referral code
    pub referral_bonus_points: u64,
}

impl Default for ProgramRules {
    fn default() -> Self {
        Self {
            welcome_bonus_points: 500,
            referral_bonus_points: 500,
        }
    }
}

/// Main rewards ledger
pub struct RewardsLedger {
    store: AccountStore,
    rules: ProgramRules,
    broadcast: AccountBroadcast,
}

impl RewardsLedger {
    pub fn new(store: AccountStore, rules: ProgramRules) -> Self {
        Self {
            store,
            rules,
            broadcast: AccountBroadcast::new(),
        }
    }

    /// Subscribe to full-account updates published after every mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<UserRewardsAccount> {
        self.broadcast.subscribe()
    }

    /// Get current program rules
    pub fn rules(&self) -> &ProgramRules {
        &self.rules
    }

    /// Load the persisted account for a user unchanged, or create a fresh
    /// one seeded with the welcome bonus and persist it.
    pub async fn load_or_create(&self, user_id: &str) -> Result<UserRewardsAccount, LedgerError> {
        if user_id.is_empty() {
            return Err(LedgerError::EmptyUserId);
        }

        if let Some(account) = self.store.get(user_id).await? {
            return Ok(account);
        }

        let account =
            UserRewardsAccount::new(user_id.to_string(), self.rules.welcome_bonus_points);
        self.store.put(&account).await?;
        self.broadcast.publish(&account);

        info!(
            user_id = %user_id,
            referral_code = %account.referral_code,
            welcome_bonus = self.rules.welcome_bonus_points,
            "Created rewards account"
        );

        Ok(account)
    }

    /// Record an earn action: balance and lifetime points grow by `points`,
    /// the tier is recomputed, and the entry lands at the front of the
    /// history. `points` must be positive.
    pub async fn earn_points(
        &self,
        user_id: &str,
        label: &str,
        points: u64,
        description: &str,
    ) -> Result<UserRewardsAccount, LedgerError> {
        if points == 0 {
            return Err(LedgerError::InvalidPoints);
        }

        let mut account = self.load_or_create(user_id).await?;
        account.apply_earn(label, points, description);

        self.store.put(&account).await?;
        self.broadcast.publish(&account);

        debug!(
            user_id = %user_id,
            label = %label,
            points = points,
            total_points = account.total_points,
            tier = ?account.tier,
            "Points earned"
        );

        Ok(account)
    }

    /// Redeem a catalog reward. Fails with `InsufficientPoints` when the
    /// balance cannot cover the cost; the stored account is untouched in
    /// that case. Lifetime points and tier are unaffected by redemption.
    pub async fn redeem_reward(
        &self,
        user_id: &str,
        reward: &RewardCatalogEntry,
    ) -> Result<UserRewardsAccount, LedgerError> {
        let mut account = self.load_or_create(user_id).await?;
        account.apply_redeem(reward)?;

        self.store.put(&account).await?;
        self.broadcast.publish(&account);

        debug!(
            user_id = %user_id,
            reward_id = %reward.id,
            cost_points = reward.cost_points,
            total_points = account.total_points,
            "Reward redeemed"
        );

        Ok(account)
    }

    /// Apply a referral code for a user. Well-formed codes credit the
    /// redeeming account with the referral bonus. The referring account is
    /// not credited: issued codes are not indexed, so the owner cannot be
    /// resolved from the code.
    pub async fn apply_referral_code(
        &self,
        user_id: &str,
        code: &str,
    ) -> Result<UserRewardsAccount, LedgerError> {
        if !is_well_formed(code) {
            return Err(LedgerError::InvalidReferralCode);
        }

        self.earn_points(
            user_id,
            "Referral",
            self.rules.referral_bonus_points,
            &format!("Applied referral code {}", code),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RewardCatalog;
    use crate::ledger::{ActionKind, Tier};

    fn test_ledger() -> RewardsLedger {
        RewardsLedger::new(AccountStore::memory(), ProgramRules::default())
    }

    #[tokio::test]
    async fn test_new_account_gets_welcome_bonus() {
        let ledger = test_ledger();

        let account = ledger.load_or_create("user_1").await.unwrap();

        assert_eq!(account.total_points, 500);
        assert_eq!(account.lifetime_points, 500);
        assert_eq!(account.tier, Tier::Bronze);
        assert_eq!(account.actions.len(), 1);
    }

    #[tokio::test]
    async fn test_load_returns_persisted_account_unchanged() {
        let ledger = test_ledger();

        let created = ledger.load_or_create("user_1").await.unwrap();
        ledger
            .earn_points("user_1", "Place an order", 200, "Order #1042")
            .await
            .unwrap();

        let loaded = ledger.load_or_create("user_1").await.unwrap();
        assert_eq!(loaded.referral_code, created.referral_code);
        assert_eq!(loaded.total_points, 700);
        assert_eq!(loaded.actions.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_user_id_rejected() {
        let ledger = test_ledger();
        assert_eq!(
            ledger.load_or_create("").await.unwrap_err(),
            LedgerError::EmptyUserId
        );
    }

    #[tokio::test]
    async fn test_zero_points_rejected() {
        let ledger = test_ledger();
        assert_eq!(
            ledger
                .earn_points("user_1", "Place an order", 0, "")
                .await
                .unwrap_err(),
            LedgerError::InvalidPoints
        );
    }

    #[tokio::test]
    async fn test_earn_crosses_tier_boundary() {
        let ledger = test_ledger();

        // 500 welcome + 1400 = 1900 lifetime, still Bronze
        let account = ledger
            .earn_points("user_1", "Place an order", 1_400, "Order #1042")
            .await
            .unwrap();
        assert_eq!(account.lifetime_points, 1_900);
        assert_eq!(account.tier, Tier::Bronze);

        // +200 = 2100 lifetime crosses the Silver boundary
        let account = ledger
            .earn_points("user_1", "Place an order", 200, "Order #1043")
            .await
            .unwrap();
        assert_eq!(account.lifetime_points, 2_100);
        assert_eq!(account.tier, Tier::Silver);
    }

    #[tokio::test]
    async fn test_redeem_success_and_failure() {
        let ledger = test_ledger();
        let catalog = RewardCatalog::default();
        let coupon = catalog.reward("coupon-5").unwrap();

        ledger
            .earn_points("user_1", "Place an order", 200, "Order #1042")
            .await
            .unwrap();

        // 700 balance covers the 500-point coupon
        let account = ledger.redeem_reward("user_1", coupon).await.unwrap();
        assert_eq!(account.total_points, 200);
        assert_eq!(account.lifetime_points, 700);
        assert_eq!(account.actions[0].kind, ActionKind::Redeem);

        // 200 left does not cover another one; stored account is untouched
        let err = ledger.redeem_reward("user_1", coupon).await.unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientPoints {
                required: 500,
                available: 200
            }
        );
        let after = ledger.load_or_create("user_1").await.unwrap();
        assert_eq!(after, account);
    }

    #[tokio::test]
    async fn test_referral_credits_redeeming_account() {
        let ledger = test_ledger();

        let account = ledger
            .apply_referral_code("user_1", "TTA1B2C3")
            .await
            .unwrap();

        assert_eq!(account.total_points, 1_000); // 500 welcome + 500 referral
        assert_eq!(account.actions[0].label, "Referral");
    }

    #[tokio::test]
    async fn test_malformed_referral_rejected() {
        let ledger = test_ledger();

        let err = ledger
            .apply_referral_code("user_1", "not-a-code")
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidReferralCode);
    }
}
