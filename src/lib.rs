// ABOUTME: Library root for po-sync
// ABOUTME: Exposes the Airtable client, SQLite extractor, and reconciler

pub mod airtable;
pub mod commands;
pub mod config;
pub mod reconcile;
pub mod sqlite;

pub use config::AirtableConfig;
