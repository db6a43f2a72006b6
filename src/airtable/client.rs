// ABOUTME: HTTP client for one Airtable table
// ABOUTME: Follows list pagination to exhaustion and submits single-record creates

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};

use crate::config::AirtableConfig;

use super::models::{AirtableRecord, CreateOutcome, CreateRequest, RecordPage};

pub struct AirtableClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl AirtableClient {
    pub fn new(config: &AirtableConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint(),
            token: config.token.clone(),
        }
    }

    /// Fetch the complete current state of the remote table.
    ///
    /// Issues list requests until a response carries no `offset` cursor and
    /// returns the concatenation of all pages in server order. A non-success
    /// page status is logged but not treated as a hard error; its body parses
    /// as an empty page (see `RecordPage`).
    pub async fn fetch_all_records(&self) -> Result<Vec<AirtableRecord>> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(&self.endpoint)
                .header("Authorization", format!("Bearer {}", self.token));
            if let Some(ref cursor) = offset {
                request = request.query(&[("offset", cursor)]);
            }

            let response = request
                .send()
                .await
                .context("Failed to list records from Airtable")?;

            if !response.status().is_success() {
                tracing::warn!(
                    "Airtable list request returned status {}; treating page as empty",
                    response.status()
                );
            }

            let page: RecordPage = response
                .json()
                .await
                .context("Failed to parse Airtable list response")?;

            records.extend(page.records);

            match page.offset {
                Some(cursor) => offset = Some(cursor),
                None => break,
            }
        }

        tracing::info!("Fetched {} existing records from Airtable", records.len());

        Ok(records)
    }

    /// Submit one create request and classify the outcome by status code.
    ///
    /// 200/201 means the record now exists remotely; anything else is
    /// reported back with the status and response body so the caller can log
    /// it and continue. Not idempotent on its own: the reconciler's pre-check
    /// is the only duplicate guard.
    pub async fn create_record(&self, fields: Map<String, Value>) -> Result<CreateOutcome> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&CreateRequest { fields })
            .send()
            .await
            .context("Failed to send create request to Airtable")?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            Ok(CreateOutcome::Created)
        } else {
            let body = response.text().await.unwrap_or_default();
            Ok(CreateOutcome::Failed {
                status: status.as_u16(),
                body,
            })
        }
    }
}
