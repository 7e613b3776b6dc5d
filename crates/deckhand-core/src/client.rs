//! Airtable read client
//!
//! API docs: https://airtable.com/developers/web/api/list-records
//! Every read targets the first page of one fixed view; the pagination
//! cursor in the response is never followed.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::config::Config;
use crate::error::FetchError;
use crate::record::{Record, RecordsPage};

const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

/// Read access to the named tables of one base.
///
/// The aggregator depends on this seam rather than on a concrete client, so
/// tests can substitute an in-memory implementation.
#[async_trait]
pub trait TableReader: Send + Sync {
    /// Fetch the first page of `view` in `table`, in view order.
    async fn first_page(&self, table: &str, view: &str) -> Result<Vec<Record>, FetchError>;
}

/// Client for one Airtable base.
pub struct BaseClient {
    http: reqwest::Client,
    api_key: String,
    base_id: String,
    api_url: Url,
}

impl BaseClient {
    /// Creates a client against the public Airtable API.
    pub fn new(config: &Config) -> Self {
        let api_url = Url::parse(DEFAULT_API_URL).expect("default API URL is valid");
        Self::build(config, api_url)
    }

    /// Creates a client against an alternate endpoint (tests, proxies).
    pub fn with_api_url(config: &Config, api_url: &str) -> Result<Self, FetchError> {
        let api_url =
            Url::parse(api_url).map_err(|_| FetchError::InvalidUrl(api_url.to_string()))?;
        Ok(Self::build(config, api_url))
    }

    fn build(config: &Config, api_url: Url) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            api_key: config.api_key.clone(),
            base_id: config.base_id.clone(),
            api_url,
        }
    }

    /// Endpoint for listing records of `table`.
    ///
    /// Table names may contain spaces ("Action Cards"), so they are pushed
    /// as percent-encoded path segments rather than formatted into a string.
    fn table_url(&self, table: &str) -> Result<Url, FetchError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.api_url.to_string()))?
            .push(&self.base_id)
            .push(table);
        Ok(url)
    }
}

#[async_trait]
impl TableReader for BaseClient {
    #[instrument(skip(self))]
    async fn first_page(&self, table: &str, view: &str) -> Result<Vec<Record>, FetchError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("view", view);

        let response = self
            .http
            .get(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let page: RecordsPage = serde_json::from_str(&body)?;
        if page.offset.is_some() {
            debug!("table {} has more pages; reading the first only", table);
        }
        debug!("fetched {} records from {}", page.records.len(), table);
        Ok(page.records)
    }
}

/// Pull a readable message out of an error body.
///
/// The API uses both `{"error": {"type", "message"}}` and the bare
/// `{"error": "CODE"}` form; anything else falls back to the raw body.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        match value.get("error") {
            Some(Value::String(code)) => return code.clone(),
            Some(error) => {
                if let Some(message) = error.get("message").and_then(Value::as_str) {
                    return message.to_string();
                }
            }
            None => {}
        }
    }
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            api_key: "keyTest".to_string(),
            base_id: "appTest".to_string(),
        }
    }

    #[test]
    fn test_table_url_encodes_spaces() {
        let client = BaseClient::new(&test_config());
        let url = client.table_url("Action Cards").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.airtable.com/v0/appTest/Action%20Cards"
        );
    }

    #[test]
    fn test_view_query_encoding() {
        let client = BaseClient::new(&test_config());
        let mut url = client.table_url("Rooms").unwrap();
        url.query_pairs_mut().append_pair("view", "Grid view");
        assert_eq!(
            url.as_str(),
            "https://api.airtable.com/v0/appTest/Rooms?view=Grid+view"
        );
    }

    #[test]
    fn test_with_api_url_accepts_override() {
        let client = BaseClient::with_api_url(&test_config(), "http://127.0.0.1:9999/v0").unwrap();
        let url = client.table_url("Rooms").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9999/v0/appTest/Rooms");
    }

    #[test]
    fn test_with_api_url_rejects_garbage() {
        let result = BaseClient::with_api_url(&test_config(), "not a url");
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_error_message_object_form() {
        let body = r#"{"error": {"type": "AUTHENTICATION_REQUIRED", "message": "Invalid API key"}}"#;
        assert_eq!(error_message(body), "Invalid API key");
    }

    #[test]
    fn test_error_message_string_form() {
        assert_eq!(error_message(r#"{"error": "NOT_FOUND"}"#), "NOT_FOUND");
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("  upstream exploded  "), "upstream exploded");
    }
}
