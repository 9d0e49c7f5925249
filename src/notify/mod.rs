//! Cross-Surface Account Broadcast
//!
//! After every mutation the ledger publishes the full updated account so
//! other surfaces in the same process (the storefront page, the rewards
//! popup) can refresh. Notify-only and fire-and-forget: a publish with no
//! live subscribers is not an error, and delivery failure never affects
//! the ledger's own state.

use tokio::sync::broadcast;
use tracing::trace;

use crate::ledger::UserRewardsAccount;

/// Slow subscribers miss updates rather than backpressure the ledger.
const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct AccountBroadcast {
    tx: broadcast::Sender<UserRewardsAccount>,
}

impl AccountBroadcast {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to account updates.
    pub fn subscribe(&self) -> broadcast::Receiver<UserRewardsAccount> {
        self.tx.subscribe()
    }

    /// Publish the updated account. A send error only means nobody is
    /// listening right now.
    pub fn publish(&self, account: &UserRewardsAccount) {
        if self.tx.send(account.clone()).is_err() {
            trace!(user_id = %account.user_id, "Account update published with no subscribers");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for AccountBroadcast {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_update() {
        let broadcast = AccountBroadcast::new();
        let mut rx = broadcast.subscribe();

        let account = UserRewardsAccount::new("user_1".to_string(), 500);
        broadcast.publish(&account);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.user_id, "user_1");
        assert_eq!(received.total_points, 500);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_fine() {
        let broadcast = AccountBroadcast::new();
        assert_eq!(broadcast.subscriber_count(), 0);

        let account = UserRewardsAccount::new("user_1".to_string(), 500);
        broadcast.publish(&account);
    }
}
