use csv::StringRecord;
use ro_sync_types::{OrderLine, OrderStatus, QtyPair};
use tracing::warn;
use uuid::Uuid;

use crate::Result;

/// Column lookup over one header row, tolerant of the casing and naming
/// variants the sheet has used across revisions.
struct Columns {
    headers: Vec<String>,
}

impl Columns {
    fn new(headers: &StringRecord) -> Self {
        Self {
            headers: headers
                .iter()
                .map(|header| header.trim().to_lowercase())
                .collect(),
        }
    }

    fn find(&self, aliases: &[&str]) -> Option<usize> {
        aliases.iter().find_map(|alias| {
            let alias = alias.to_lowercase();
            self.headers.iter().position(|header| *header == alias)
        })
    }
}

fn text(record: &StringRecord, column: Option<usize>) -> String {
    column
        .and_then(|at| record.get(at))
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Missing and malformed counts decode to zero; one bad cell must not fail
/// the whole fetch.
fn qty(record: &StringRecord, column: Option<usize>) -> u32 {
    column
        .and_then(|at| record.get(at))
        .map(str::trim)
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

/// Decode the sheet's published CSV export into order lines.
///
/// Rows whose status token is unrecognized after normalization are skipped
/// with a warning; rows without a `UID` cell get a generated one.
pub fn decode_csv(input: &str) -> Result<Vec<OrderLine>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input.as_bytes());

    let columns = Columns::new(reader.headers()?);
    let uid = columns.find(&["UID"]);
    let order_id = columns.find(&["RO ID", "SESSION ID"]);
    let store_name = columns.find(&["Store Name"]);
    let article_code = columns.find(&["Kode Artikel"]);
    let article_name = columns.find(&["Artikel Name", "Artikel"]);
    let requested_ddd = columns.find(&["RO Qty DDD", "RO BOX DDD"]);
    let requested_ljbb = columns.find(&["RO Qty LJBB", "RO BOX LJBB"]);
    let warehouse_ddd = columns.find(&["WH Qty DDD", "WHS DDD"]);
    let warehouse_ljbb = columns.find(&["WH Qty LJBB", "WHS LJBB"]);
    let timestamp = columns.find(&["Timestamp"]);
    let status = columns.find(&["Status"]);

    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let raw_status = text(&record, status);
        let status = match raw_status.parse::<OrderStatus>() {
            Ok(status) => status,
            Err(err) => {
                warn!(%err, "skipping row with unrecognized status");
                continue;
            }
        };

        let mut uid = text(&record, uid);
        if uid.is_empty() {
            uid = format!("gen-{}", Uuid::new_v4().simple());
        }

        lines.push(OrderLine {
            uid,
            order_id: text(&record, order_id),
            store_name: text(&record, store_name),
            article_code: text(&record, article_code),
            article_name: text(&record, article_name),
            requested_qty: QtyPair::new(
                qty(&record, requested_ddd),
                qty(&record, requested_ljbb),
            ),
            warehouse_qty: QtyPair::new(
                qty(&record, warehouse_ddd),
                qty(&record, warehouse_ljbb),
            ),
            timestamp: text(&record, timestamp),
            status,
        });
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_current_header_names() {
        let csv_text = "\
UID,RO ID,Store Name,Kode Artikel,Artikel Name,RO Qty DDD,RO Qty LJBB,WH Qty DDD,WH Qty LJBB,Timestamp,Status
row-1,RO-2511-0007,Gandaria City,ART-104,Canvas Sneaker,4,2,1,0,11/20/2025 09:15:00,PICKING_LIST
";
        let lines = decode_csv(csv_text).unwrap();

        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.uid, "row-1");
        assert_eq!(line.order_id, "RO-2511-0007");
        assert_eq!(line.store_name, "Gandaria City");
        assert_eq!(line.article_code, "ART-104");
        assert_eq!(line.article_name, "Canvas Sneaker");
        assert_eq!(line.requested_qty, QtyPair::new(4, 2));
        assert_eq!(line.warehouse_qty, QtyPair::new(1, 0));
        assert_eq!(line.status, OrderStatus::PickingList);
    }

    #[test]
    fn test_decodes_legacy_header_names() {
        let csv_text = "\
SESSION ID,STORE NAME,KODE ARTIKEL,ARTIKEL,RO BOX DDD,RO BOX LJBB,WHS DDD,WHS LJBB,TIMESTAMP,STATUS
RO-2511-0001,Central Park,ART-001,Leather Boot,3,0,0,0,11/19/2025 14:02:00,Queue
";
        let lines = decode_csv(csv_text).unwrap();

        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.order_id, "RO-2511-0001");
        assert_eq!(line.article_name, "Leather Boot");
        assert_eq!(line.requested_qty, QtyPair::new(3, 0));
        assert_eq!(line.status, OrderStatus::Queue);
    }

    #[test]
    fn test_generates_uid_when_column_missing() {
        let csv_text = "\
RO ID,Store Name,Kode Artikel,Artikel Name,RO Qty DDD,RO Qty LJBB,Status
RO-2511-0002,Senayan,ART-002,Slip On,1,1,QUEUE
";
        let lines = decode_csv(csv_text).unwrap();
        assert!(lines[0].uid.starts_with("gen-"));
    }

    #[test]
    fn test_malformed_quantities_default_to_zero() {
        let csv_text = "\
UID,RO ID,Store Name,Kode Artikel,Artikel Name,RO Qty DDD,RO Qty LJBB,Status
row-1,RO-2511-0003,Kota Kasablanka,ART-003,High Top,abc,,queque
";
        let lines = decode_csv(csv_text).unwrap();

        assert_eq!(lines[0].requested_qty, QtyPair::default());
        assert_eq!(lines[0].warehouse_qty, QtyPair::default());
        assert_eq!(lines[0].status, OrderStatus::Queue);
    }

    #[test]
    fn test_normalizes_spaced_status_tokens() {
        let csv_text = "\
UID,RO ID,Store Name,Kode Artikel,Artikel Name,Status
row-1,RO-2511-0004,Pondok Indah,ART-004,Runner,Picking List
";
        let lines = decode_csv(csv_text).unwrap();
        assert_eq!(lines[0].status, OrderStatus::PickingList);
    }

    #[test]
    fn test_skips_rows_with_unknown_status() {
        let csv_text = "\
UID,RO ID,Store Name,Kode Artikel,Artikel Name,Status
row-1,RO-2511-0005,Grand Indonesia,ART-005,Loafer,SHIPPED
row-2,RO-2511-0005,Grand Indonesia,ART-006,Derby,QUEUE
";
        let lines = decode_csv(csv_text).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].uid, "row-2");
    }

    #[test]
    fn test_empty_input_yields_no_lines() {
        assert!(decode_csv("").unwrap().is_empty());
        assert!(decode_csv("UID,RO ID,Status\n").unwrap().is_empty());
    }
}
