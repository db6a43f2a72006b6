// ABOUTME: Source extractor for purchase-order line items
// ABOUTME: Runs the fixed five-way join and materializes typed rows

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde_json::{Map, Value};

/// The fixed extraction query. LEFT JOINs throughout so a detail row with a
/// missing header, vendor, requester, or item still comes back with NULL
/// fields instead of being dropped.
const LINE_ITEM_QUERY: &str = "
SELECT
    po_detail.id AS 'id',
    po.po_number AS 'PO #',
    po.date AS 'Date',
    requester.name AS 'Requester',
    requester.dept AS 'Department',
    vendor.id AS 'Vendor ID',
    vendor.name AS 'Vendor Name',
    vendor.city AS 'Vendor City',
    vendor.phone AS 'Vendor Phone',
    vendor.email AS 'Vendor Email',
    vendor.comments AS 'Vendor Notes',
    item.item_name AS 'New SKU',
    item.alt_sku AS 'Old SKU',
    item.purchase_price AS 'Unit Cost',
    po_detail.quantity AS 'Quantity',
    item.purchase_price * po_detail.quantity AS 'Cost',
    item.url AS 'Item Link'
FROM po_detail
LEFT JOIN po ON po.id = po_detail.po_id
LEFT JOIN vendor ON po.vendor_id = vendor.id
LEFT JOIN requester ON po.requester_id = requester.id
LEFT JOIN item ON po_detail.item_id = item.id";

/// One purchase-order line item joined with its related entities.
///
/// `id` is the detail-row primary key and the reconciliation key. Every
/// other field is nullable because all joins are LEFT JOINs. `cost` is
/// computed by the query (`purchase_price * quantity`) and is NULL whenever
/// either operand is NULL.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub id: i64,
    pub po_number: Option<String>,
    pub date: Option<String>,
    pub requester: Option<String>,
    pub department: Option<String>,
    pub vendor_id: Option<i64>,
    pub vendor_name: Option<String>,
    pub vendor_city: Option<String>,
    pub vendor_phone: Option<String>,
    pub vendor_email: Option<String>,
    pub vendor_notes: Option<String>,
    pub new_sku: Option<String>,
    pub old_sku: Option<String>,
    pub unit_cost: Option<f64>,
    pub quantity: Option<i64>,
    pub cost: Option<f64>,
    pub item_link: Option<String>,
}

impl LineItem {
    /// The Airtable `fields` object for this item, keyed by the remote
    /// column labels. Absent relations serialize as explicit nulls, matching
    /// what the query produced.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::from(self.id));
        fields.insert("PO #".to_string(), opt_str(&self.po_number));
        fields.insert("Date".to_string(), opt_str(&self.date));
        fields.insert("Requester".to_string(), opt_str(&self.requester));
        fields.insert("Department".to_string(), opt_str(&self.department));
        fields.insert("Vendor ID".to_string(), opt_int(self.vendor_id));
        fields.insert("Vendor Name".to_string(), opt_str(&self.vendor_name));
        fields.insert("Vendor City".to_string(), opt_str(&self.vendor_city));
        fields.insert("Vendor Phone".to_string(), opt_str(&self.vendor_phone));
        fields.insert("Vendor Email".to_string(), opt_str(&self.vendor_email));
        fields.insert("Vendor Notes".to_string(), opt_str(&self.vendor_notes));
        fields.insert("New SKU".to_string(), opt_str(&self.new_sku));
        fields.insert("Old SKU".to_string(), opt_str(&self.old_sku));
        fields.insert("Unit Cost".to_string(), opt_float(self.unit_cost));
        fields.insert("Quantity".to_string(), opt_int(self.quantity));
        fields.insert("Cost".to_string(), opt_float(self.cost));
        fields.insert("Item Link".to_string(), opt_str(&self.item_link));
        fields
    }
}

fn opt_str(value: &Option<String>) -> Value {
    match value {
        Some(s) => Value::from(s.clone()),
        None => Value::Null,
    }
}

fn opt_int(value: Option<i64>) -> Value {
    match value {
        Some(i) => Value::from(i),
        None => Value::Null,
    }
}

fn opt_float(value: Option<f64>) -> Value {
    match value {
        Some(f) => Value::from(f),
        None => Value::Null,
    }
}

/// Run the fixed join query and materialize every result row.
///
/// Query failure is fatal; the caller aborts the run.
pub fn extract_line_items(conn: &Connection) -> Result<Vec<LineItem>> {
    let mut stmt = conn
        .prepare(LINE_ITEM_QUERY)
        .context("Failed to prepare line-item extraction query")?;

    let items = stmt
        .query_map([], |row| {
            Ok(LineItem {
                id: row.get(0)?,
                po_number: row.get(1)?,
                date: row.get(2)?,
                requester: row.get(3)?,
                department: row.get(4)?,
                vendor_id: row.get(5)?,
                vendor_name: row.get(6)?,
                vendor_city: row.get(7)?,
                vendor_phone: row.get(8)?,
                vendor_email: row.get(9)?,
                vendor_notes: row.get(10)?,
                new_sku: row.get(11)?,
                old_sku: row.get(12)?,
                unit_cost: row.get(13)?,
                quantity: row.get(14)?,
                cost: row.get(15)?,
                item_link: row.get(16)?,
            })
        })
        .context("Failed to query line items")?
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to collect line items")?;

    tracing::info!("Extracted {} line items from source database", items.len());

    Ok(items)
}
