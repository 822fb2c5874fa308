//! Reconciliation cache for the order queue.
//!
//! The sheet behind the queue is eventually consistent: a write can take
//! minutes to appear in a subsequent read, so a naive "last poll wins" merge
//! would flicker fresh edits back to stale values. Edits here apply to the
//! in-memory snapshot immediately and are remembered as pending intents — a
//! per-field expected value with a protection window. Poll data that reports
//! the expected value confirms the intent and releases the field; mismatching
//! data is held off until the window lapses, after which the sheet's truth
//! wins.

mod cache;
mod intent;
mod service;

pub use cache::{CacheConfig, ConnectionStatus, ReplenishmentCache};
pub use intent::{ExpectedValue, IntentKey, PendingIntent};
pub use service::SyncService;
