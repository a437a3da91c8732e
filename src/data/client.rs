//! SWAPI HTTP client
//!
//! Fetches every page of a category by following the `next` cursor that
//! SWAPI includes in each response body.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use super::Category;

/// Base URL for the public Star Wars API
pub const SWAPI_BASE_URL: &str = "https://swapi.dev/api";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("swapi-explorer/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when fetching records from the API
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failure, timeout or undecodable page body
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    /// A `next` cursor pointed back at a page that was already fetched
    #[error("Pagination loop detected at {0}")]
    PaginationLoop(String),
}

/// One page of a SWAPI list response
#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    next: Option<String>,
    results: Vec<Value>,
}

/// A source of raw category records
///
/// Implemented by [`SwapiClient`] for the real API; tests substitute their
/// own source to count fetches.
pub trait RecordSource {
    /// Returns every record of the category, in API order, across all pages
    fn fetch_pages(
        &self,
        category: Category,
    ) -> impl Future<Output = Result<Vec<Value>, FetchError>> + Send;
}

/// Client for the paginated SWAPI list endpoints
#[derive(Debug, Clone)]
pub struct SwapiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl SwapiClient {
    /// Creates a client against the given base URL
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// URL of the first page for a category
    pub fn endpoint(&self, category: Category) -> String {
        format!("{}/{}/", self.base_url.trim_end_matches('/'), category)
    }

    /// Fetches and decodes a single page
    async fn fetch_page(&self, url: &str) -> Result<Page, FetchError> {
        debug!("Sending request to {}", url);
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json::<Page>().await?)
    }
}

impl RecordSource for SwapiClient {
    async fn fetch_pages(&self, category: Category) -> Result<Vec<Value>, FetchError> {
        let mut records = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(self.endpoint(category));

        while let Some(url) = next {
            if !visited.insert(url.clone()) {
                return Err(FetchError::PaginationLoop(url));
            }

            let page = self.fetch_page(&url).await?;
            debug!("Parsed {} {} records from {}", page.results.len(), category, url);
            records.extend(page.results);
            next = page.next.filter(|n| !n.is_empty());
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client_for(server: &mockito::ServerGuard) -> SwapiClient {
        SwapiClient::with_base_url(server.url(), Duration::from_secs(5))
            .expect("Client should build")
    }

    #[test]
    fn test_endpoint_joins_base_and_category() {
        let client =
            SwapiClient::with_base_url("https://swapi.dev/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint(Category::People), "https://swapi.dev/api/people/");
        assert_eq!(client.endpoint(Category::Films), "https://swapi.dev/api/films/");
    }

    #[tokio::test]
    async fn test_fetch_pages_follows_next_cursor() {
        let mut server = mockito::Server::new_async().await;
        let page_two_url = format!("{}/planets/page-2/", server.url());

        let first = server
            .mock("GET", "/planets/")
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "count": 3,
                    "next": page_two_url,
                    "previous": null,
                    "results": [{ "name": "Tatooine" }, { "name": "Alderaan" }]
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/planets/page-2/")
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "count": 3,
                    "next": null,
                    "previous": "ignored",
                    "results": [{ "name": "Yavin IV" }]
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let records = client_for(&server)
            .fetch_pages(Category::Planets)
            .await
            .expect("Fetch should succeed");

        let names: Vec<&str> = records.iter().filter_map(|r| r["name"].as_str()).collect();
        assert_eq!(names, vec!["Tatooine", "Alderaan", "Yavin IV"]);
        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_pages_surfaces_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/films/")
            .with_status(503)
            .create_async()
            .await;

        let err = client_for(&server)
            .fetch_pages(Category::Films)
            .await
            .expect_err("503 should be an error");

        match err {
            FetchError::Status { status, url } => {
                assert_eq!(status, 503);
                assert!(url.ends_with("/films/"));
            }
            other => panic!("Expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_pages_rejects_non_page_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/species/")
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail": "Not found"}"#)
            .create_async()
            .await;

        let result = client_for(&server).fetch_pages(Category::Species).await;
        assert!(matches!(result, Err(FetchError::Http(_))));
    }

    #[tokio::test]
    async fn test_fetch_pages_detects_self_referencing_cursor() {
        let mut server = mockito::Server::new_async().await;
        let self_url = format!("{}/vehicles/", server.url());
        let _mock = server
            .mock("GET", "/vehicles/")
            .with_header("content-type", "application/json")
            .with_body(json!({ "next": self_url, "results": [] }).to_string())
            .create_async()
            .await;

        let result = client_for(&server).fetch_pages(Category::Vehicles).await;
        assert!(matches!(result, Err(FetchError::PaginationLoop(_))));
    }

    #[tokio::test]
    async fn test_fetch_pages_fails_when_unreachable() {
        // Port 9 (discard) is not expected to accept connections
        let client =
            SwapiClient::with_base_url("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let result = client.fetch_pages(Category::People).await;
        assert!(matches!(result, Err(FetchError::Http(_))));
    }
}
