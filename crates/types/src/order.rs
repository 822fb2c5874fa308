use serde::{Deserialize, Serialize};
use std::fmt;

use crate::OrderStatus;

/// A fulfillment channel of the warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Ddd,
    Ljbb,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Ddd => "ddd",
            Channel::Ljbb => "ljbb",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Box counts for the two fulfillment channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QtyPair {
    pub ddd: u32,
    pub ljbb: u32,
}

impl QtyPair {
    pub fn new(ddd: u32, ljbb: u32) -> Self {
        Self { ddd, ljbb }
    }

    pub fn channel(self, channel: Channel) -> u32 {
        match channel {
            Channel::Ddd => self.ddd,
            Channel::Ljbb => self.ljbb,
        }
    }

    /// Copy with one channel replaced.
    pub fn with_channel(self, channel: Channel, value: u32) -> Self {
        match channel {
            Channel::Ddd => Self { ddd: value, ..self },
            Channel::Ljbb => Self { ljbb: value, ..self },
        }
    }

    pub fn total(self) -> u32 {
        self.ddd + self.ljbb
    }
}

/// One article line within a replenishment order.
///
/// `uid` is assigned client-side at ingestion and is unique across the
/// in-memory set; `order_id` comes from the sheet and groups lines into one
/// order, so it repeats across lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub uid: String,
    pub order_id: String,
    pub store_name: String,
    pub article_code: String,
    pub article_name: String,

    /// Quantities requested by the store; the only quantities editable from
    /// the board.
    pub requested_qty: QtyPair,

    /// Quantities counted by the warehouse; written only by poll data.
    pub warehouse_qty: QtyPair,

    /// Last update time as reported by the sheet, verbatim.
    pub timestamp: String,

    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qty_pair_with_channel() {
        let qty = QtyPair::new(3, 7);
        assert_eq!(qty.with_channel(Channel::Ddd, 9), QtyPair::new(9, 7));
        assert_eq!(qty.with_channel(Channel::Ljbb, 0), QtyPair::new(3, 0));
        assert_eq!(qty.total(), 10);
        assert_eq!(qty.channel(Channel::Ljbb), 7);
    }

    #[test]
    fn test_channel_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Channel::Ddd).unwrap(), "\"ddd\"");
        assert_eq!(serde_json::to_string(&Channel::Ljbb).unwrap(), "\"ljbb\"");
    }
}
