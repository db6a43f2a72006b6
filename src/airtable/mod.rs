// ABOUTME: Airtable REST API integration
// ABOUTME: Wire models plus a client for paginated list and single-record create

mod client;
mod models;

pub use client::AirtableClient;
pub use models::{AirtableRecord, CreateOutcome, RecordPage};
