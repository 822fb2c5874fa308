//! Read models for the board views.
//!
//! Pure projections over a cache snapshot: the dashboard roll-up and the
//! per-status pages. Nothing here mutates state; the views recompute on
//! every render from the flat line list.

use chrono::{DateTime, NaiveDateTime, Utc};
use ro_sync_types::{group_by_order, OrderGroup, OrderLine, OrderStatus};

/// Dashboard roll-up over the whole queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSummary {
    pub total_orders: usize,

    /// Requested boxes across both channels.
    pub total_requested_boxes: u32,

    /// Group count per pipeline step, in pipeline order.
    pub status_counts: Vec<(OrderStatus, usize)>,
}

pub fn summarize(lines: &[OrderLine]) -> BoardSummary {
    let groups = group_by_order(lines);
    let total_requested_boxes = lines.iter().map(|line| line.requested_qty.total()).sum();
    let status_counts = OrderStatus::FLOW
        .iter()
        .map(|&status| {
            (
                status,
                groups.iter().filter(|group| group.status == status).count(),
            )
        })
        .collect();

    BoardSummary {
        total_orders: groups.len(),
        total_requested_boxes,
        status_counts,
    }
}

/// One per-status page: the header line and the grouped cards,
/// first-encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPage {
    pub status: OrderStatus,
    pub title: &'static str,
    pub groups: Vec<OrderGroup>,
}

pub fn status_page(lines: &[OrderLine], status: OrderStatus) -> StatusPage {
    let filtered: Vec<OrderLine> = lines
        .iter()
        .filter(|line| line.status == status)
        .cloned()
        .collect();
    StatusPage {
        status,
        title: status.label(),
        groups: group_by_order(&filtered),
    }
}

/// Resolve a request path segment to the page it names. Unknown slugs fall
/// back to the queue page, same as the board treats bad URLs.
pub fn page_for_route(lines: &[OrderLine], slug: &str) -> StatusPage {
    let status = OrderStatus::from_route_slug(slug).unwrap_or(OrderStatus::Queue);
    status_page(lines, status)
}

/// The action a group's advance button performs, or `None` once terminal.
pub fn next_status(group: &OrderGroup) -> Option<OrderStatus> {
    group.status.next()
}

/// Parse a sheet timestamp. The sheet writes either RFC 3339 or the plain
/// `M/D/YYYY H:MM:SS` form Sheets uses for date cells.
pub fn parse_sheet_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%m/%d/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }
    None
}

/// Compact age label for a group header: "5m ago", "3h ago", "2d ago".
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes().max(0);
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ro_sync_types::QtyPair;

    fn line(uid: &str, order_id: &str, status: OrderStatus, requested: QtyPair) -> OrderLine {
        OrderLine {
            uid: uid.to_string(),
            order_id: order_id.to_string(),
            store_name: "Central Park".to_string(),
            article_code: format!("ART-{uid}"),
            article_name: "Leather Boot".to_string(),
            requested_qty: requested,
            warehouse_qty: QtyPair::default(),
            timestamp: "11/20/2025 09:15:00".to_string(),
            status,
        }
    }

    #[test]
    fn test_summary_counts_groups_and_boxes() {
        let lines = vec![
            line("1", "RO-1", OrderStatus::Queue, QtyPair::new(2, 1)),
            line("2", "RO-1", OrderStatus::Queue, QtyPair::new(1, 0)),
            line("3", "RO-2", OrderStatus::Delivery, QtyPair::new(0, 4)),
        ];

        let summary = summarize(&lines);
        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.total_requested_boxes, 8);
        assert_eq!(summary.status_counts[OrderStatus::Queue.index()].1, 1);
        assert_eq!(summary.status_counts[OrderStatus::Delivery.index()].1, 1);
        assert_eq!(summary.status_counts[OrderStatus::Completed.index()].1, 0);
    }

    #[test]
    fn test_status_page_filters_then_groups() {
        let lines = vec![
            line("1", "RO-1", OrderStatus::Queue, QtyPair::new(1, 1)),
            line("2", "RO-2", OrderStatus::Delivery, QtyPair::new(1, 1)),
            line("3", "RO-1", OrderStatus::Queue, QtyPair::new(1, 1)),
        ];

        let page = status_page(&lines, OrderStatus::Queue);
        assert_eq!(page.title, "Queue");
        assert_eq!(page.groups.len(), 1);
        assert_eq!(page.groups[0].order_id, "RO-1");
        assert_eq!(page.groups[0].lines.len(), 2);

        assert!(status_page(&lines, OrderStatus::Completed)
            .groups
            .is_empty());
    }

    #[test]
    fn test_page_for_route_falls_back_to_queue() {
        let lines = vec![line("1", "RO-1", OrderStatus::Delivery, QtyPair::new(1, 1))];

        let page = page_for_route(&lines, "delivery");
        assert_eq!(page.status, OrderStatus::Delivery);
        assert_eq!(page.title, "Delivery");
        assert_eq!(page.groups.len(), 1);

        let fallback = page_for_route(&lines, "no-such-page");
        assert_eq!(fallback.status, OrderStatus::Queue);
        assert!(fallback.groups.is_empty());
    }

    #[test]
    fn test_parse_sheet_timestamp_formats() {
        assert!(parse_sheet_timestamp("11/20/2025 09:15:00").is_some());
        assert!(parse_sheet_timestamp("2025-11-20 09:15:00").is_some());
        assert!(parse_sheet_timestamp("2025-11-20T09:15:00Z").is_some());
        assert!(parse_sheet_timestamp("yesterday").is_none());
        assert!(parse_sheet_timestamp("").is_none());
    }

    #[test]
    fn test_format_relative_buckets() {
        let base = Utc.with_ymd_and_hms(2025, 11, 20, 12, 0, 0).unwrap();

        let five_min = base - chrono::Duration::minutes(5);
        assert_eq!(format_relative(five_min, base), "5m ago");

        let three_hours = base - chrono::Duration::hours(3);
        assert_eq!(format_relative(three_hours, base), "3h ago");

        let two_days = base - chrono::Duration::days(2);
        assert_eq!(format_relative(two_days, base), "2d ago");

        // Clock skew clamps to zero instead of going negative
        let future = base + chrono::Duration::minutes(10);
        assert_eq!(format_relative(future, base), "0m ago");
    }
}
