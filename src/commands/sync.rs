// ABOUTME: The sync command - extract, fetch, plan, write
// ABOUTME: Prints per-record progress lines and returns a run report

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;

use crate::airtable::{AirtableClient, CreateOutcome};
use crate::config::AirtableConfig;
use crate::{reconcile, sqlite};

pub struct SyncOptions {
    pub database: PathBuf,
    /// Plan and report without creating any remote records
    pub dry_run: bool,
}

/// Counts for one run. `planned` is the size of the insert plan; in a dry
/// run nothing is created so `created` stays zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub planned: usize,
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SyncReport {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Run one create-only sync pass.
///
/// Source extraction and remote listing run up front; the reconciler plans
/// the insert set; creates then execute sequentially in source order. A
/// failed create is reported and the loop continues - only database or
/// transport errors abort the run. State is re-derived from the remote on
/// every run, so records created before an abort are skipped next time.
pub async fn run(config: &AirtableConfig, opts: &SyncOptions) -> Result<SyncReport> {
    let conn = sqlite::open_database(&opts.database)?;
    let items = sqlite::extract_line_items(&conn)
        .context("Failed to extract line items from source database")?;

    let client = AirtableClient::new(config);
    let records = client.fetch_all_records().await?;

    let index = reconcile::build_index(&records);
    let plan = reconcile::plan_inserts(&items, &index);
    let planned: HashSet<i64> = plan.iter().map(|item| item.id).collect();

    tracing::info!(
        "Planned {} inserts, {} of {} line items already synced",
        planned.len(),
        items.len() - planned.len(),
        items.len()
    );

    let mut report = SyncReport {
        planned: planned.len(),
        ..SyncReport::default()
    };

    for item in &items {
        if !planned.contains(&item.id) {
            println!("Skipping existing record with id {}", item.id);
            report.skipped += 1;
            continue;
        }

        if opts.dry_run {
            println!("Would create record for line item {}", item.id);
            continue;
        }

        match client.create_record(item.to_fields()).await? {
            CreateOutcome::Created => {
                println!("Created record for line item {}", item.id);
                report.created += 1;
            }
            CreateOutcome::Failed { status, body } => {
                println!(
                    "Failed to sync line item {}: status {} - {}",
                    item.id, status, body
                );
                report.failed += 1;
            }
        }
    }

    println!("Updated on {}.", Local::now().format("%Y-%m-%d %H:%M:%S"));

    tracing::info!(
        "Sync complete: {} created, {} skipped, {} failed",
        report.created,
        report.skipped,
        report.failed
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_has_failures() {
        let clean = SyncReport {
            planned: 2,
            created: 2,
            ..SyncReport::default()
        };
        assert!(!clean.has_failures());

        let dirty = SyncReport {
            planned: 2,
            created: 1,
            failed: 1,
            ..SyncReport::default()
        };
        assert!(dirty.has_failures());
    }
}
