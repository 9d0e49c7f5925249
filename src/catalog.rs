//! Reward and Earn-Action Catalogs
//!
//! Static read-only reference data: the rewards members can spend points
//! on, and the actions that earn points. Supplied by configuration, never
//! computed or mutated by the ledger.

use serde::{Deserialize, Serialize};

/// What a catalog reward turns into when redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardKind {
    Coupon,
    Discount,
    Freebie,
}

/// One redeemable reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardCatalogEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost_points: u64,
    pub kind: RewardKind,
    pub value: String,
    pub icon: String,
}

/// One way to earn points, shown to members as a call to action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnActionDefinition {
    pub label: String,
    pub points: u64,
    pub icon: String,
}

/// The full static catalog.
#[derive(Debug, Clone)]
pub struct RewardCatalog {
    rewards: Vec<RewardCatalogEntry>,
    earn_actions: Vec<EarnActionDefinition>,
}

impl RewardCatalog {
    pub fn new(rewards: Vec<RewardCatalogEntry>, earn_actions: Vec<EarnActionDefinition>) -> Self {
        Self {
            rewards,
            earn_actions,
        }
    }

    pub fn rewards(&self) -> &[RewardCatalogEntry] {
        &self.rewards
    }

    pub fn earn_actions(&self) -> &[EarnActionDefinition] {
        &self.earn_actions
    }

    /// Look up a reward by catalog id
    pub fn reward(&self, id: &str) -> Option<&RewardCatalogEntry> {
        self.rewards.iter().find(|r| r.id == id)
    }
}

impl Default for RewardCatalog {
    fn default() -> Self {
        let rewards = vec![
            RewardCatalogEntry {
                id: "coupon-5".to_string(),
                name: "$5 Off Coupon".to_string(),
                description: "$5 off any order".to_string(),
                cost_points: 500,
                kind: RewardKind::Coupon,
                value: "$5".to_string(),
                icon: "ticket".to_string(),
            },
            RewardCatalogEntry {
                id: "free-shipping".to_string(),
                name: "Free Shipping".to_string(),
                description: "Free standard shipping on one order".to_string(),
                cost_points: 750,
                kind: RewardKind::Freebie,
                value: "1 order".to_string(),
                icon: "truck".to_string(),
            },
            RewardCatalogEntry {
                id: "discount-10".to_string(),
                name: "10% Off".to_string(),
                description: "10% off your next order".to_string(),
                cost_points: 1_000,
                kind: RewardKind::Discount,
                value: "10%".to_string(),
                icon: "percent".to_string(),
            },
            RewardCatalogEntry {
                id: "gift-card-25".to_string(),
                name: "$25 Gift Card".to_string(),
                description: "$25 TechTrove gift card".to_string(),
                cost_points: 2_500,
                kind: RewardKind::Coupon,
                value: "$25".to_string(),
                icon: "gift".to_string(),
            },
        ];

        let earn_actions = vec![
            EarnActionDefinition {
                label: "Sign up".to_string(),
                points: 500,
                icon: "user-plus".to_string(),
            },
            EarnActionDefinition {
                label: "Place an order".to_string(),
                points: 200,
                icon: "shopping-bag".to_string(),
            },
            EarnActionDefinition {
                label: "Write a review".to_string(),
                points: 100,
                icon: "star".to_string(),
            },
            EarnActionDefinition {
                label: "Refer a friend".to_string(),
                points: 500,
                icon: "users".to_string(),
            },
            EarnActionDefinition {
                label: "Birthday bonus".to_string(),
                points: 250,
                icon: "cake".to_string(),
            },
        ];

        Self::new(rewards, earn_actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_lookup() {
        let catalog = RewardCatalog::default();

        let coupon = catalog.reward("coupon-5").unwrap();
        assert_eq!(coupon.cost_points, 500);
        assert_eq!(coupon.kind, RewardKind::Coupon);

        assert!(catalog.reward("no-such-reward").is_none());
    }

    #[test]
    fn test_default_catalog_is_populated() {
        let catalog = RewardCatalog::default();
        assert!(!catalog.rewards().is_empty());
        assert!(!catalog.earn_actions().is_empty());
    }
}
