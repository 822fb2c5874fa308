use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use ro_sync_sheet::RemoteStore;
use ro_sync_types::{Channel, Mutation, OrderLine, OrderStatus};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{ExpectedValue, IntentKey, PendingIntent};

/// Tuning knobs for the reconciliation cache.
///
/// Both windows are deliberate configuration, not constants: the sheet's
/// write-to-read propagation delay varies by deployment.
#[derive(Clone, Copy, Debug)]
pub struct CacheConfig {
    /// How long a local edit outranks mismatching poll data.
    pub protection_window: Duration,

    /// Quiet period before a burst of quantity edits is submitted.
    pub debounce_quiet_period: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            protection_window: Duration::from_secs(150),
            debounce_quiet_period: Duration::from_millis(400),
        }
    }
}

/// Reachability of the sheet backend as seen by the poll loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub is_connected: bool,

    /// When the last successful sync finished. Survives later failures, so
    /// the board can show how stale the snapshot is.
    pub last_sync: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DebounceKey {
    uid: String,
    channel: Channel,
}

struct CacheState {
    lines: Vec<OrderLine>,
    intents: HashMap<IntentKey, PendingIntent>,
    debounce: HashMap<DebounceKey, JoinHandle<()>>,
    connection: ConnectionStatus,
}

struct CacheInner {
    state: Mutex<CacheState>,
    remote: Arc<dyn RemoteStore>,
    config: CacheConfig,
}

/// Authoritative in-memory view of the order queue.
///
/// Mutations rewrite the snapshot synchronously and are forwarded to the
/// sheet fire-and-forget; [`ReplenishmentCache::reconcile`] merges poll
/// results without clobbering edits the sheet has not absorbed yet. Clones
/// share one cache, so the single instance can be handed to every view.
#[derive(Clone)]
pub struct ReplenishmentCache {
    inner: Arc<CacheInner>,
}

/// Outcome of checking one fetched field against the intent ledger.
enum Resolution {
    /// No live intent; the fetched value stands.
    Accept,
    /// Intent confirmed or expired; the fetched value stands and the intent
    /// is finished.
    AcceptAndClear,
    /// Intent still protected; the local value stands.
    KeepLocal,
}

fn resolve(
    intent: Option<&PendingIntent>,
    fetched: &ExpectedValue,
    window: Duration,
) -> Resolution {
    match intent {
        None => Resolution::Accept,
        Some(intent) if intent.expected == *fetched => Resolution::AcceptAndClear,
        Some(intent) if intent.is_expired(window) => Resolution::AcceptAndClear,
        Some(_) => Resolution::KeepLocal,
    }
}

impl ReplenishmentCache {
    pub fn new(remote: Arc<dyn RemoteStore>, config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                state: Mutex::new(CacheState {
                    lines: Vec::new(),
                    intents: HashMap::new(),
                    debounce: HashMap::new(),
                    connection: ConnectionStatus::default(),
                }),
                remote,
                config,
            }),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        self.inner.state.lock().unwrap()
    }

    /// Current snapshot, cloned.
    pub fn snapshot(&self) -> Vec<OrderLine> {
        self.lock_state().lines.clone()
    }

    /// Lines currently in one pipeline step, for the per-status board pages.
    pub fn lines_with_status(&self, status: OrderStatus) -> Vec<OrderLine> {
        self.lock_state()
            .lines
            .iter()
            .filter(|line| line.status == status)
            .cloned()
            .collect()
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.lock_state().connection
    }

    /// Number of local edits still awaiting sheet confirmation.
    pub fn pending_edits(&self) -> usize {
        self.lock_state().intents.len()
    }

    /// Expected value of a live pending intent, if any.
    pub fn pending_intent(&self, key: &IntentKey) -> Option<ExpectedValue> {
        self.lock_state()
            .intents
            .get(key)
            .map(|intent| intent.expected.clone())
    }

    /// Move every line of `order_id` one pipeline step forward.
    ///
    /// The snapshot changes synchronously; the sheet write is spawned
    /// fire-and-forget. No-op when the order is unknown or already terminal.
    pub fn advance_status(&self, order_id: &str) {
        let next = {
            let mut state = self.lock_state();
            let Some(current) = state
                .lines
                .iter()
                .find(|line| line.order_id == order_id)
                .map(|line| line.status)
            else {
                return;
            };
            let Some(next) = current.next() else {
                debug!(order_id, "order already terminal, ignoring advance");
                return;
            };

            for line in state
                .lines
                .iter_mut()
                .filter(|line| line.order_id == order_id)
            {
                line.status = next;
            }
            state.intents.insert(
                IntentKey::Status(order_id.to_string()),
                PendingIntent::new(ExpectedValue::Status(next)),
            );
            next
        };

        info!(order_id, status = %next, "advanced order status");

        let remote = Arc::clone(&self.inner.remote);
        let mutation = Mutation::MoveStatus {
            ro_id: order_id.to_string(),
            new_status: next,
        };
        tokio::spawn(async move {
            if let Err(err) = remote.submit_mutation(&mutation).await {
                warn!(
                    %err,
                    action = mutation.action(),
                    "sheet write failed; local edit stands until the protection window lapses"
                );
            }
        });
    }

    /// Rewrite one requested-quantity channel of the line `uid`.
    ///
    /// Warehouse counts are read-only on this path; only poll data changes
    /// them. Submission is debounced per (line, channel): a fresh edit
    /// restarts the quiet period and only the last value goes out.
    pub fn update_quantity(&self, uid: &str, channel: Channel, value: u32) {
        let mut state = self.lock_state();
        let Some(line) = state.lines.iter_mut().find(|line| line.uid == uid) else {
            return;
        };

        line.requested_qty = line.requested_qty.with_channel(channel, value);
        let expected = line.requested_qty;
        // Identity is captured now, not when the timer fires. If a poll
        // rewrites the line's order_id or article code inside the quiet
        // period, the submission goes out with the old identity.
        let mutation = Mutation::UpdateQty {
            ro_id: line.order_id.clone(),
            kode_artikel: line.article_code.clone(),
            location: channel,
            val: value,
        };

        state.intents.insert(
            IntentKey::Qty(uid.to_string()),
            PendingIntent::new(ExpectedValue::Qty(expected)),
        );

        let key = DebounceKey {
            uid: uid.to_string(),
            channel,
        };
        if let Some(previous) = state.debounce.remove(&key) {
            previous.abort();
        }

        let quiet = self.inner.config.debounce_quiet_period;
        let remote = Arc::clone(&self.inner.remote);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            if let Err(err) = remote.submit_mutation(&mutation).await {
                warn!(
                    %err,
                    action = mutation.action(),
                    "sheet write failed; local edit stands until the protection window lapses"
                );
            }
        });
        state.debounce.insert(key, handle);
    }

    /// Merge a fetched snapshot into the cache.
    ///
    /// The first load replaces the snapshot outright. Afterwards the fetched
    /// data wins everywhere except the two protected fields, which consult
    /// the intent ledger: a match confirms the intent, a mismatch past the
    /// protection window abandons it, and a mismatch inside the window keeps
    /// the local value. The fetched snapshot is authoritative for row
    /// membership.
    pub fn reconcile(&self, fetched: Vec<OrderLine>) {
        let window = self.inner.config.protection_window;
        let mut state = self.lock_state();

        if state.lines.is_empty() {
            debug!(rows = fetched.len(), "first load, accepting snapshot outright");
            state.lines = fetched;
            return;
        }

        let local: HashMap<String, OrderLine> = state
            .lines
            .iter()
            .map(|line| (line.uid.clone(), line.clone()))
            .collect();

        // Keys whose target rows were present in this fetch.
        let mut live_keys: HashSet<IntentKey> = HashSet::new();
        let mut merged = Vec::with_capacity(fetched.len());

        for mut line in fetched {
            let Some(known) = local.get(&line.uid) else {
                merged.push(line);
                continue;
            };

            let status_key = IntentKey::Status(line.order_id.clone());
            live_keys.insert(status_key.clone());
            match resolve(
                state.intents.get(&status_key),
                &ExpectedValue::Status(line.status),
                window,
            ) {
                Resolution::AcceptAndClear => {
                    state.intents.remove(&status_key);
                }
                Resolution::KeepLocal => line.status = known.status,
                Resolution::Accept => {}
            }

            let qty_key = IntentKey::Qty(line.uid.clone());
            live_keys.insert(qty_key.clone());
            match resolve(
                state.intents.get(&qty_key),
                &ExpectedValue::Qty(line.requested_qty),
                window,
            ) {
                Resolution::AcceptAndClear => {
                    state.intents.remove(&qty_key);
                }
                Resolution::KeepLocal => line.requested_qty = known.requested_qty,
                Resolution::Accept => {}
            }

            merged.push(line);
        }

        state.lines = merged;

        // Intents whose rows vanished from the fetch stay while the row may
        // still reappear inside the window, then the sheet's absence wins.
        state
            .intents
            .retain(|key, intent| live_keys.contains(key) || !intent.is_expired(window));
    }

    /// One poll cycle: fetch the sheet and merge the result.
    ///
    /// A fetch failure marks the cache disconnected and leaves the snapshot
    /// untouched; it never propagates to callers.
    pub async fn sync_once(&self) {
        match self.inner.remote.fetch_snapshot().await {
            Ok(fetched) => {
                self.reconcile(fetched);
                let mut state = self.lock_state();
                state.connection = ConnectionStatus {
                    is_connected: true,
                    last_sync: Some(Utc::now()),
                };
            }
            Err(err) => {
                warn!(%err, "sheet fetch failed, keeping last good snapshot");
                self.lock_state().connection.is_connected = false;
            }
        }
    }
}
