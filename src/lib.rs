//! Warehouse replenishment-order tracking over a sheet-backed queue.
//!
//! Wires the sheet client, the reconciliation cache, and the poll service
//! together from an [`AppConfig`], and exposes the read models the board
//! views render. The cache is an explicitly constructed, explicitly owned
//! object — every consumer gets a clone of the one instance built here, so
//! tests can wire a mock store with no process-wide state.

pub mod board;
pub mod telemetry;

pub use ro_sync_cache::{
    CacheConfig, ConnectionStatus, ExpectedValue, IntentKey, PendingIntent, ReplenishmentCache,
    SyncService,
};
pub use ro_sync_config::{validate_config, AppConfig, ConfigError, ConfigLoader};
pub use ro_sync_sheet::{
    decode_csv, MockRemoteStore, RemoteStore, SheetClient, SheetClientConfig, SheetError,
};
pub use ro_sync_types::{
    group_by_order, Channel, Mutation, OrderGroup, OrderLine, OrderStatus, QtyPair,
    StatusParseError,
};

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;

/// A fully wired application: one cache, one poll service over it.
pub struct App {
    pub cache: ReplenishmentCache,
    pub service: SyncService,
}

impl App {
    /// Construct the production wiring from configuration.
    pub fn build(config: &AppConfig) -> anyhow::Result<App> {
        validate_config(config).context("invalid configuration")?;

        let client = SheetClient::new(SheetClientConfig {
            csv_url: config.remote.csv_url.clone(),
            script_url: config.remote.script_url.clone(),
            timeout: Duration::from_millis(config.remote.timeout_ms),
        })
        .context("failed to build sheet client")?;

        Ok(Self::with_remote(Arc::new(client), config))
    }

    /// Wire an arbitrary remote store; tests pass the mock here.
    pub fn with_remote(remote: Arc<dyn RemoteStore>, config: &AppConfig) -> App {
        let cache = ReplenishmentCache::new(
            remote,
            CacheConfig {
                protection_window: config.sync.protection_window(),
                debounce_quiet_period: config.sync.debounce_quiet_period(),
            },
        );
        let service = SyncService::new(cache.clone(), config.sync.poll_interval());
        App { cache, service }
    }
}
