use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{SearchError, SearchHit, SearchProvider};

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// Minimal client for Tavily's `/search` endpoint.
pub struct TavilyClient {
    http:     reqwest::Client,
    api_key:  String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query:          &'a str,
    max_results:    usize,
    include_answer: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

impl TavilyClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http:     reqwest::Client::new(),
            api_key:  api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/search", self.base_url)
    }

    fn decode(body: &str) -> Result<Vec<SearchHit>, serde_json::Error> {
        let response: SearchResponse = serde_json::from_str(body)?;
        Ok(response.results)
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        let request = SearchRequest { query, max_results, include_answer: true };

        let response = self.http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SearchError::Status { status: status.as_u16(), body });
        }

        Self::decode(&body).map_err(|e| SearchError::Status {
            status: status.as_u16(),
            body:   format!("undecodable search response: {}", e),
        })
    }
}
