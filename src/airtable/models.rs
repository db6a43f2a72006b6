// ABOUTME: Data structures for the Airtable records API
// ABOUTME: Deserialized from list responses and serialized for create requests

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record already present in the remote table.
///
/// `id` is the remote-assigned identifier (e.g. "recXXXXXXXXXXXXXX");
/// `fields` holds the column label → value mapping. Records written by a
/// prior sync carry the source row id under the "id" field.
#[derive(Debug, Clone, Deserialize)]
pub struct AirtableRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// One page of a list response.
///
/// `records` defaults to empty so an error body (which carries no `records`
/// key) deserializes as an empty page rather than failing the run. `offset`
/// is the pagination cursor; its absence means the listing is exhausted.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPage {
    #[serde(default)]
    pub records: Vec<AirtableRecord>,
    pub offset: Option<String>,
}

/// Body of a create request: `{"fields": {...}}`.
#[derive(Debug, Serialize)]
pub struct CreateRequest {
    pub fields: Map<String, Value>,
}

/// Classified result of one create request.
#[derive(Debug, Clone)]
pub enum CreateOutcome {
    /// Status 200/201; the record now exists remotely.
    Created,
    /// Any other status. The run continues with the next planned insert.
    Failed { status: u16, body: String },
}

impl CreateOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, CreateOutcome::Created)
    }
}
