use serde::{Deserialize, Serialize};

use crate::{Channel, OrderStatus};

/// A single-field write intent for the sheet backend, serialized exactly as
/// the Apps Script endpoint expects it.
///
/// Writes are best-effort and carry no version token; the reconciliation
/// cache compensates with expected-value confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Mutation {
    /// Advance every line of an order one pipeline step.
    #[serde(rename_all = "camelCase")]
    MoveStatus {
        ro_id: String,
        new_status: OrderStatus,
    },

    /// Rewrite one requested-quantity channel of one article line.
    #[serde(rename_all = "camelCase")]
    UpdateQty {
        ro_id: String,
        kode_artikel: String,
        location: Channel,
        val: u32,
    },
}

impl Mutation {
    /// Action name, for log lines.
    pub fn action(&self) -> &'static str {
        match self {
            Mutation::MoveStatus { .. } => "moveStatus",
            Mutation::UpdateQty { .. } => "updateQty",
        }
    }
}
