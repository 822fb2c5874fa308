use async_trait::async_trait;
use ro_sync_types::{Mutation, OrderLine};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{decode_csv, Result, SheetError};

/// Endpoints for the sheet-backed store.
#[derive(Clone, Debug)]
pub struct SheetClientConfig {
    /// Published CSV export of the queue sheet (read path).
    pub csv_url: String,

    /// Apps Script endpoint accepting mutation payloads (write path). An
    /// empty value disables writes; mutations are then dropped with a log
    /// line, matching a read-only deployment.
    pub script_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// External source of truth for order lines.
///
/// Reads return the full current set. Writes are best-effort single
/// requests with no acknowledgment contract beyond HTTP success; callers
/// must not expect read-after-write consistency.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<Vec<OrderLine>>;
    async fn submit_mutation(&self, mutation: &Mutation) -> Result<()>;
}

/// reqwest-backed client for the production sheet.
pub struct SheetClient {
    config: SheetClientConfig,
    http: reqwest::Client,
}

impl SheetClient {
    pub fn new(config: SheetClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }
}

#[async_trait]
impl RemoteStore for SheetClient {
    async fn fetch_snapshot(&self) -> Result<Vec<OrderLine>> {
        // The publish endpoint caches aggressively; a throwaway query
        // parameter forces a fresh read.
        let buster = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let url = format!("{}&t={buster}", self.config.csv_url);

        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let lines = decode_csv(&body)?;
        debug!(rows = lines.len(), "fetched sheet snapshot");
        Ok(lines)
    }

    async fn submit_mutation(&self, mutation: &Mutation) -> Result<()> {
        if self.config.script_url.is_empty() {
            info!(action = mutation.action(), "write path disabled, dropping mutation");
            return Ok(());
        }

        // Apps Script only accepts simple requests; the body is JSON but the
        // content type must stay text/plain to avoid a CORS preflight.
        let body = serde_json::to_string(mutation)?;
        let response = self
            .http
            .post(&self.config.script_url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(SheetError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(action = mutation.action(), response = %text, "sheet write accepted");
        Ok(())
    }
}

/// In-memory store for tests: scripted snapshots, recorded writes, and
/// switchable failure injection.
#[derive(Default)]
pub struct MockRemoteStore {
    snapshot: Mutex<Vec<OrderLine>>,
    submissions: Mutex<Vec<Mutation>>,
    fail_fetch: Mutex<bool>,
    fail_submit: Mutex<bool>,
}

impl MockRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace what the next fetch returns.
    pub async fn set_snapshot(&self, lines: Vec<OrderLine>) {
        *self.snapshot.lock().await = lines;
    }

    pub async fn set_fail_fetch(&self, fail: bool) {
        *self.fail_fetch.lock().await = fail;
    }

    pub async fn set_fail_submit(&self, fail: bool) {
        *self.fail_submit.lock().await = fail;
    }

    /// Every mutation submitted so far, in order.
    pub async fn submissions(&self) -> Vec<Mutation> {
        self.submissions.lock().await.clone()
    }
}

#[async_trait]
impl RemoteStore for MockRemoteStore {
    async fn fetch_snapshot(&self) -> Result<Vec<OrderLine>> {
        if *self.fail_fetch.lock().await {
            return Err(SheetError::Unavailable("simulated outage".to_string()));
        }
        Ok(self.snapshot.lock().await.clone())
    }

    async fn submit_mutation(&self, mutation: &Mutation) -> Result<()> {
        if *self.fail_submit.lock().await {
            return Err(SheetError::Unavailable("simulated outage".to_string()));
        }
        self.submissions.lock().await.push(mutation.clone());
        Ok(())
    }
}
