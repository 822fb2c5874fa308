use std::time::Duration;
use tracing::debug;

use crate::ReplenishmentCache;

/// Recurring poll driving the cache.
///
/// One fixed-period loop per process: fetch the sheet, merge, repeat. All
/// merge decisions live in [`ReplenishmentCache::sync_once`]; this type only
/// owns the cadence.
pub struct SyncService {
    cache: ReplenishmentCache,
    poll_interval: Duration,
}

impl SyncService {
    pub fn new(cache: ReplenishmentCache, poll_interval: Duration) -> Self {
        Self {
            cache,
            poll_interval,
        }
    }

    /// Run the poll loop forever. Fetch failures only flip the connection
    /// flag; the loop itself never exits.
    pub async fn run(&self) {
        loop {
            self.cache.sync_once().await;
            debug!(
                interval_secs = self.poll_interval.as_secs(),
                "sync cycle complete"
            );
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
