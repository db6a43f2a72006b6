// ABOUTME: Runtime configuration for the Airtable endpoint and credentials
// ABOUTME: Built once at startup and passed by reference into each component

/// Default Airtable REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

/// Connection settings for one Airtable table.
///
/// Holds the personal access token plus the base and table the sync targets.
/// The API base URL is overridable so tests can point the client at a mock
/// server.
#[derive(Debug, Clone)]
pub struct AirtableConfig {
    pub api_url: String,
    pub token: String,
    pub base_id: String,
    pub table_name: String,
}

impl AirtableConfig {
    pub fn new(api_url: &str, token: String, base_id: String, table_name: String) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            base_id,
            table_name,
        }
    }

    /// Full URL of the table resource, used for both list and create requests.
    pub fn endpoint(&self) -> String {
        format!("{}/{}/{}", self.api_url, self.base_id, self.table_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_and_table() {
        let config = AirtableConfig::new(
            DEFAULT_API_URL,
            "pat_test".to_string(),
            "appXYZ".to_string(),
            "PO Line Items".to_string(),
        );
        assert_eq!(
            config.endpoint(),
            "https://api.airtable.com/v0/appXYZ/PO Line Items"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = AirtableConfig::new(
            "http://localhost:9999/",
            "pat_test".to_string(),
            "appXYZ".to_string(),
            "po".to_string(),
        );
        assert_eq!(config.endpoint(), "http://localhost:9999/appXYZ/po");
    }
}
