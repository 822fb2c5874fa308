//! Remote store client for the sheet-backed order queue.
//!
//! The queue lives in a spreadsheet: reads come from its published CSV
//! export, writes go through an Apps Script endpoint as JSON payloads. The
//! sheet is eventually consistent — a write can take minutes to show up in a
//! subsequent read — which is why the cache layer protects in-flight edits
//! instead of trusting every poll.

mod client;
mod decode;

pub use client::{MockRemoteStore, RemoteStore, SheetClient, SheetClientConfig};
pub use decode::decode_csv;

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("csv decode failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("payload encode failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("remote rejected write: http {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("remote store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;
