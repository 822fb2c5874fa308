//! Headless runner: load configuration, start the poll loop, keep the cache
//! current until killed.

use anyhow::Context;
use ro_sync::{telemetry, App, ConfigLoader};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ro-sync.toml".to_string());
    let config = ConfigLoader::from_file_with_env(Path::new(&path), "RO_SYNC")
        .with_context(|| format!("failed to load config from {path}"))?;

    telemetry::init_tracing(&config.log.level)?;

    let app = App::build(&config)?;
    tracing::info!(
        poll_interval_secs = config.sync.poll_interval_secs,
        "starting sheet sync"
    );
    app.service.run().await;

    Ok(())
}
