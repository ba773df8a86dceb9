//! Web search via the Tavily API. Used for opportunity discovery.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Tavily API key is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Tavily's slower, higher-recall mode. Opportunity discovery needs it.
const SEARCH_DEPTH: &str = "advanced";

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub max_results: u32,
    pub include_answer: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 6,
            include_answer: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'a str,
    max_results: u32,
    include_answer: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl SearchClient {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    pub async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::NotConfigured)?;

        debug!("Tavily search: {query}");
        let response = self
            .client
            .post(TAVILY_SEARCH_URL)
            .timeout(Duration::from_secs(60))
            .json(&TavilyRequest {
                api_key,
                query,
                search_depth: SEARCH_DEPTH,
                max_results: options.max_results,
                include_answer: options.include_answer,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body: SearchResponse = response.json().await?;
        info!("Tavily returned {} results", body.results.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_advanced_depth() {
        let body = serde_json::to_value(TavilyRequest {
            api_key: "k",
            query: "rust internships",
            search_depth: SEARCH_DEPTH,
            max_results: 6,
            include_answer: true,
        })
        .unwrap();
        assert_eq!(body["search_depth"], "advanced");
        assert_eq!(body["max_results"], 6);
    }

    #[test]
    fn test_response_tolerates_missing_content() {
        let json = r#"{"answer": null, "results": [{"title": "Hack", "url": "https://x.dev"}]}"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.results.len(), 1);
        assert!(resp.results[0].content.is_empty());
    }

    #[tokio::test]
    async fn test_search_without_key_is_not_configured() {
        let client = SearchClient::new(reqwest::Client::new(), None);
        let err = client
            .search("anything", &SearchOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::NotConfigured));
    }
}
