use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::holding::Holding;

/// Callback invoked with the freshly recomputed holdings.
pub type HoldingsCallback = Box<dyn Fn(&[Holding]) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Explicit subscription list for holdings changes.
///
/// Subscribers are notified in subscription order.
#[derive(Default)]
pub struct HoldingsWatcher {
    subscribers: Vec<(SubscriptionId, HoldingsCallback)>,
}

impl HoldingsWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: HoldingsCallback) -> SubscriptionId {
        let id = SubscriptionId(Uuid::new_v4());
        self.subscribers.push((id, callback));
        id
    }

    /// Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn notify(&self, holdings: &[Holding]) {
        for (_, callback) in &self.subscribers {
            callback(holdings);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for HoldingsWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoldingsWatcher")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
