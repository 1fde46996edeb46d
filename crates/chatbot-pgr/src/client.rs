//! PGR search transport.
//!
//! Defines the `ComplaintSearch` async trait and its `reqwest`-backed
//! implementation. The transport reports the raw status and body; deciding
//! what a status means is left to the response formatter.

use async_trait::async_trait;
use chatbot_core::config::PgrConfig;
use tracing::{debug, warn};

use crate::error::TrackError;
use crate::types::{SearchQuery, SearchResponse};

/// Issues complaint searches against the PGR service.
#[async_trait]
pub trait ComplaintSearch: Send + Sync {
    /// Run one search. Transport failures are errors; any HTTP status,
    /// successful or not, is returned as a `SearchResponse`.
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, TrackError>;
}

/// HTTP client for the PGR search endpoint.
#[derive(Debug, Clone)]
pub struct PgrClient {
    http: reqwest::Client,
    search_url: String,
}

impl PgrClient {
    /// Create a client posting to `search_url` with default transport settings.
    pub fn new(search_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            search_url: search_url.into(),
        }
    }

    pub fn from_config(config: &PgrConfig) -> Self {
        Self::new(config.search_url())
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

#[async_trait]
impl ComplaintSearch for PgrClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, TrackError> {
        debug!(
            url = %self.search_url,
            tenant_id = %query.tenant_id(),
            max_records = query.max_records(),
            "Searching PGR complaints"
        );

        let params = query.query_params();
        let resp = self
            .http
            .post(&self.search_url)
            .query(&params[..])
            .json(&query.body())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "PGR search returned a non-success status");
        }

        let status = status.as_u16();
        let body = resp.text().await?;

        Ok(SearchResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TrackRequest;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    const SEARCH_PATH: &str = "/pgr-services/v2/request/_search";

    fn make_query() -> SearchQuery {
        let req = TrackRequest::new("pb.amritsar", "token-1", json!({"id": 23})).unwrap();
        SearchQuery::new(&req, 5)
    }

    #[tokio::test]
    async fn test_search_posts_request_info_with_query_params() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(SEARCH_PATH)
                    .query_param("tenantId", "pb.amritsar")
                    .query_param("noOfRecords", "5")
                    .json_body(json!({
                        "RequestInfo": {"authToken": "token-1", "userInfo": {"id": 23}}
                    }));
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"services":[]}"#);
            })
            .await;

        let client = PgrClient::new(server.url(SEARCH_PATH));
        let resp = client.search(&make_query()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, r#"{"services":[]}"#);
    }

    #[tokio::test]
    async fn test_search_returns_error_status_as_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(SEARCH_PATH);
                then.status(500).body("internal failure");
            })
            .await;

        let client = PgrClient::new(server.url(SEARCH_PATH));
        let resp = client.search(&make_query()).await.unwrap();

        assert_eq!(resp.status, 500);
        assert!(!resp.is_success());
        assert_eq!(resp.body, "internal failure");
    }

    #[tokio::test]
    async fn test_search_connection_refused_is_http_error() {
        let client = PgrClient::new("http://127.0.0.1:1/_search");
        let err = client.search(&make_query()).await.unwrap_err();
        assert!(matches!(err, TrackError::Http(_)));
    }

    #[test]
    fn test_from_config_joins_host_and_path() {
        let config = PgrConfig {
            service_host: "http://localhost:8083".to_string(),
            search_path: "/rainmaker-pgr/v1/requests/_search".to_string(),
            ..PgrConfig::default()
        };
        let client = PgrClient::from_config(&config);
        assert_eq!(
            client.search_url(),
            "http://localhost:8083/rainmaker-pgr/v1/requests/_search"
        );
    }
}
