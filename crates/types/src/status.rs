use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One step of the fixed fulfillment pipeline every replenishment order
/// moves through. Variant order is pipeline order; an order advances exactly
/// one step at a time, with no skips, regressions, or branches.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Waiting for the warehouse to pick it up
    Queue,

    /// Picking list issued, collection in progress
    PickingList,

    /// Picked quantities being verified
    FinalPicking,

    /// DNPB paperwork in process
    DnpbProcess,

    /// On a truck
    Delivery,

    /// Received at the destination store
    ArrivedStore,

    /// Terminal state
    Completed,
}

impl OrderStatus {
    /// The pipeline, first step to last.
    pub const FLOW: [OrderStatus; 7] = [
        OrderStatus::Queue,
        OrderStatus::PickingList,
        OrderStatus::FinalPicking,
        OrderStatus::DnpbProcess,
        OrderStatus::Delivery,
        OrderStatus::ArrivedStore,
        OrderStatus::Completed,
    ];

    /// Position of this status in the pipeline.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The following pipeline step, or `None` once terminal.
    pub fn next(self) -> Option<OrderStatus> {
        Self::FLOW.get(self.index() + 1).copied()
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Wire token as stored in the sheet (e.g. `PICKING_LIST`).
    pub fn as_token(self) -> &'static str {
        match self {
            OrderStatus::Queue => "QUEUE",
            OrderStatus::PickingList => "PICKING_LIST",
            OrderStatus::FinalPicking => "FINAL_PICKING",
            OrderStatus::DnpbProcess => "DNPB_PROCESS",
            OrderStatus::Delivery => "DELIVERY",
            OrderStatus::ArrivedStore => "ARRIVED_STORE",
            OrderStatus::Completed => "COMPLETED",
        }
    }

    /// Human label shown on the board.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Queue => "Queue",
            OrderStatus::PickingList => "Picking List",
            OrderStatus::FinalPicking => "Final Picking",
            OrderStatus::DnpbProcess => "DNPB Process",
            OrderStatus::Delivery => "Delivery",
            OrderStatus::ArrivedStore => "Arrived Store",
            OrderStatus::Completed => "Completed",
        }
    }

    /// URL path slug for the per-status board page.
    pub fn route_slug(self) -> &'static str {
        match self {
            OrderStatus::Queue => "queue",
            OrderStatus::PickingList => "picking-list",
            OrderStatus::FinalPicking => "final-picking",
            OrderStatus::DnpbProcess => "dnpb-process",
            OrderStatus::Delivery => "delivery",
            OrderStatus::ArrivedStore => "arrived-store",
            OrderStatus::Completed => "completed",
        }
    }

    /// Reverse of [`OrderStatus::route_slug`]; derives a status filter from a
    /// request path segment.
    pub fn from_route_slug(slug: &str) -> Option<OrderStatus> {
        Self::FLOW.iter().copied().find(|s| s.route_slug() == slug)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for OrderStatus {
    type Err = StatusParseError;

    /// Parse a raw sheet token. Canonicalizes case, spaces-for-underscores,
    /// and the `QUEQUE` misspelling the sheet is known to contain.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut token = s.trim().to_uppercase().replace(' ', "_");
        if token == "QUEQUE" {
            token = "QUEUE".to_string();
        }
        Self::FLOW
            .iter()
            .copied()
            .find(|status| status.as_token() == token)
            .ok_or_else(|| StatusParseError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized status token: {0}")]
pub struct StatusParseError(pub String);
