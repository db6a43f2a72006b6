// ABOUTME: Reconciler for create-only sync - decides which source rows are missing remotely
// ABOUTME: Indexes remote records by source id and plans one insert per absent row

use std::collections::HashMap;

use serde_json::Value;

use crate::airtable::AirtableRecord;
use crate::sqlite::LineItem;

/// Normalize a `fields.id` value to its index key.
///
/// Numbers and numeric strings map to the same key so a remote column that
/// came back as "7" still matches source id 7. Anything non-scalar has no
/// key and the record is skipped.
fn id_key(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Build the source-id → remote-record-id index from all fetched records.
///
/// Iterates in pagination order; when two records carry the same source id,
/// the later one wins. Remote rows without an `id` field (created by hand,
/// or from before the sync existed) are left out and can never block an
/// insert.
pub fn build_index(records: &[AirtableRecord]) -> HashMap<String, String> {
    let mut index = HashMap::new();
    for record in records {
        if let Some(key) = record.fields.get("id").and_then(id_key) {
            index.insert(key, record.id.clone());
        }
    }
    tracing::debug!(
        "Indexed {} of {} remote records by source id",
        index.len(),
        records.len()
    );
    index
}

/// Plan the insert set: every source item whose id is absent from the index,
/// in source order.
///
/// Indexed items are never planned, even when their other fields differ from
/// the remote copy - this sync creates and nothing else.
pub fn plan_inserts<'a>(
    items: &'a [LineItem],
    index: &HashMap<String, String>,
) -> Vec<&'a LineItem> {
    items
        .iter()
        .filter(|item| !index.contains_key(&item.id.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn remote_record(record_id: &str, fields: Value) -> AirtableRecord {
        serde_json::from_value(json!({"id": record_id, "fields": fields})).unwrap()
    }

    fn line_item(id: i64) -> LineItem {
        LineItem {
            id,
            po_number: Some(format!("PO-{id}")),
            date: None,
            requester: None,
            department: None,
            vendor_id: None,
            vendor_name: None,
            vendor_city: None,
            vendor_phone: None,
            vendor_email: None,
            vendor_notes: None,
            new_sku: None,
            old_sku: None,
            unit_cost: None,
            quantity: None,
            cost: None,
            item_link: None,
        }
    }

    #[test]
    fn test_index_maps_source_id_to_remote_id() {
        let records = vec![
            remote_record("recA", json!({"id": 1})),
            remote_record("recB", json!({"id": 2})),
        ];
        let index = build_index(&records);
        assert_eq!(index.len(), 2);
        assert_eq!(index["1"], "recA");
        assert_eq!(index["2"], "recB");
    }

    #[test]
    fn test_index_skips_records_without_id_field() {
        let records = vec![
            remote_record("recA", json!({"PO #": "PO-1"})),
            remote_record("recB", json!({"id": 2})),
        ];
        let index = build_index(&records);
        assert_eq!(index.len(), 1);
        assert!(!index.values().any(|v| v == "recA"));
    }

    #[test]
    fn test_index_last_write_wins_on_duplicate_id() {
        let records = vec![
            remote_record("recA", json!({"id": 7})),
            remote_record("recB", json!({"id": 7})),
        ];
        let index = build_index(&records);
        assert_eq!(index.len(), 1);
        assert_eq!(index["7"], "recB");
    }

    #[test]
    fn test_index_matches_string_and_numeric_ids() {
        let records = vec![remote_record("recA", json!({"id": "7"}))];
        let index = build_index(&records);
        let items = vec![line_item(7)];
        assert!(plan_inserts(&items, &index).is_empty());
    }

    #[test]
    fn test_plan_contains_exactly_the_unindexed_items_in_order() {
        let records = vec![
            remote_record("recA", json!({"id": 2})),
            remote_record("recB", json!({"id": 4})),
        ];
        let index = build_index(&records);
        let items = vec![line_item(1), line_item(2), line_item(3), line_item(4), line_item(5)];

        let plan = plan_inserts(&items, &index);
        let planned_ids: Vec<i64> = plan.iter().map(|i| i.id).collect();
        assert_eq!(planned_ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_indexed_items_never_planned_even_when_fields_differ() {
        let records = vec![remote_record("recA", json!({"id": 1, "PO #": "stale value"}))];
        let index = build_index(&records);
        let items = vec![line_item(1)];
        assert!(plan_inserts(&items, &index).is_empty());
    }

    #[test]
    fn test_rerun_with_everything_indexed_plans_nothing() {
        let items = vec![line_item(1), line_item(2), line_item(3)];
        let records: Vec<AirtableRecord> = items
            .iter()
            .enumerate()
            .map(|(i, item)| remote_record(&format!("rec{i}"), json!({"id": item.id})))
            .collect();
        let index = build_index(&records);
        assert!(plan_inserts(&items, &index).is_empty());
    }

    #[test]
    fn test_empty_remote_plans_every_item() {
        let items = vec![line_item(1), line_item(2)];
        let index = build_index(&[]);
        assert_eq!(plan_inserts(&items, &index).len(), 2);
    }
}
