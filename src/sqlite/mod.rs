// ABOUTME: SQLite access for the materials requisition database
// ABOUTME: Connection opening plus the purchase-order line-item extractor

pub mod extractor;

pub use extractor::{extract_line_items, LineItem};

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Open the requisition database read-only-style (no writes are ever issued).
///
/// The connection is released on every exit path by Drop, including after an
/// extraction error.
pub fn open_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open SQLite database at {}", path.display()))?;
    tracing::debug!("Opened SQLite database at {}", path.display());
    Ok(conn)
}
