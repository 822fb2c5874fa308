use ro_sync_types::{OrderStatus, QtyPair};
use std::time::Duration;
use tokio::time::Instant;

/// Key identifying one in-flight local mutation.
///
/// Status moves are keyed per order (every line of the order changes
/// together); quantity edits are keyed per line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IntentKey {
    Status(String),
    Qty(String),
}

/// Value the sheet is expected to report once it has absorbed the write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedValue {
    Status(OrderStatus),
    Qty(QtyPair),
}

/// One local edit awaiting remote confirmation.
///
/// Dropped when a poll reports the expected value (confirmed), or when the
/// protection window lapses without confirmation — the sheet's truth wins
/// once patience runs out, even if that silently reverts the edit.
#[derive(Debug, Clone)]
pub struct PendingIntent {
    pub expected: ExpectedValue,
    pub created_at: Instant,
}

impl PendingIntent {
    pub fn new(expected: ExpectedValue) -> Self {
        Self {
            expected,
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, window: Duration) -> bool {
        self.created_at.elapsed() > window
    }
}
