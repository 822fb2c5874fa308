use std::collections::HashMap;

use crate::{OrderLine, OrderStatus};

/// Read-only projection of all lines sharing an `order_id`.
///
/// Recomputed from the flat line list on every call and never stored, so it
/// cannot drift from its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderGroup {
    pub order_id: String,
    pub store_name: String,
    pub timestamp: String,

    /// Taken from the first-seen member. Lines of one order are assumed to
    /// share a status; nothing enforces it.
    pub status: OrderStatus,

    pub lines: Vec<OrderLine>,
}

/// Partition lines into one group per distinct `order_id`, preserving
/// first-encounter order. Empty input yields an empty vec.
pub fn group_by_order(lines: &[OrderLine]) -> Vec<OrderGroup> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<OrderGroup> = Vec::new();

    for line in lines {
        match index.get(line.order_id.as_str()) {
            Some(&at) => groups[at].lines.push(line.clone()),
            None => {
                index.insert(&line.order_id, groups.len());
                groups.push(OrderGroup {
                    order_id: line.order_id.clone(),
                    store_name: line.store_name.clone(),
                    timestamp: line.timestamp.clone(),
                    status: line.status,
                    lines: vec![line.clone()],
                });
            }
        }
    }

    groups
}
