//! The `search_resources` tool: web search results normalized into
//! roadmap [`Resource`] records.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::roadmap::{Resource, ResourceKind};
use crate::tools::ToolFn;

mod tavily;

pub use tavily::TavilyClient;

/// Name the model uses to call the tool.
pub const SEARCH_TOOL_NAME: &str = "search_resources";
pub const SEARCH_TOOL_DESCRIPTION: &str =
    "Finds tutorials, guides, or videos from trusted sources related to the query.";
/// Upper bound on results per query.
pub const MAX_RESULTS: usize = 5;
/// Characters of provider content kept in a description.
pub const DESCRIPTION_LIMIT: usize = 200;
pub const NO_DESCRIPTION: &str = "No description";

const VIDEO_DOMAINS: &[&str] = &["youtube.com"];

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search provider returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// One raw result from the search provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title:   String,
    pub url:     String,
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError>;
}

/// `"video"` for URLs on a known video host, `"article"` for everything else.
pub fn classify(url: &str) -> ResourceKind {
    if VIDEO_DOMAINS.iter().any(|domain| url.contains(domain)) {
        ResourceKind::Video
    } else {
        ResourceKind::Article
    }
}

/// First [`DESCRIPTION_LIMIT`] characters of `content` plus `...`, or the
/// placeholder when there is no content.
pub fn describe(content: Option<&str>) -> String {
    match content {
        Some(text) if !text.is_empty() => {
            let mut description: String = text.chars().take(DESCRIPTION_LIMIT).collect();
            description.push_str("...");
            description
        }
        _ => NO_DESCRIPTION.to_string(),
    }
}

impl From<SearchHit> for Resource {
    fn from(hit: SearchHit) -> Self {
        Resource {
            kind:        classify(&hit.url),
            description: Some(describe(hit.content.as_deref())),
            title:       hit.title,
            url:         hit.url,
        }
    }
}

pub struct ResourceSearchTool {
    provider:    Arc<dyn SearchProvider>,
    max_results: usize,
}

impl ResourceSearchTool {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider, max_results: MAX_RESULTS }
    }

    /// Results per query, clamped to `1..=MAX_RESULTS`.
    pub fn with_max_results(mut self, n: usize) -> Self {
        self.max_results = n.clamp(1, MAX_RESULTS);
        self
    }

    /// Runs one provider query. Provider failures yield an empty list.
    pub async fn search(&self, query: &str) -> Vec<Resource> {
        match self.provider.search(query, self.max_results).await {
            Ok(hits) => {
                tracing::debug!(query, hits = hits.len(), "search completed");
                hits.into_iter().take(self.max_results).map(Resource::from).collect()
            }
            Err(err) => {
                tracing::warn!(query, error = %err, "search provider failed, returning no resources");
                Vec::new()
            }
        }
    }

    /// JSON Schema for the tool's arguments.
    pub fn input_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "What to search for, e.g. 'Go concurrency tutorial for beginners'"
                }
            },
            "required": ["query"]
        })
    }

    /// Wraps the tool for the agent's registry. The model receives the
    /// resources as a JSON array.
    pub fn into_tool_fn(self: Arc<Self>) -> ToolFn {
        Box::new(move |args: HashMap<String, Value>| {
            let tool = Arc::clone(&self);
            async move {
                let query = args.get("query")
                    .and_then(Value::as_str)
                    .ok_or_else(|| "missing required string argument 'query'".to_string())?;
                let resources = tool.search(query).await;
                serde_json::to_string(&resources)
                    .map_err(|e| format!("failed to encode resources: {}", e))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(url: &str, content: Option<&str>) -> SearchHit {
        SearchHit {
            title:   "A title".to_string(),
            url:     url.to_string(),
            content: content.map(str::to_string),
        }
    }

    #[test]
    fn youtube_urls_are_videos() {
        assert_eq!(classify("https://www.youtube.com/watch?v=abc"), ResourceKind::Video);
        assert_eq!(classify("https://m.youtube.com/playlist?list=x"), ResourceKind::Video);
        assert_eq!(classify("https://go.dev/tour"), ResourceKind::Article);
        assert_eq!(classify("https://vimeo.com/123"), ResourceKind::Article);
    }

    #[test]
    fn long_content_is_cut_at_200_chars() {
        let content = "x".repeat(250);
        let description = describe(Some(&content));
        assert_eq!(description, format!("{}...", "x".repeat(200)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let content = "é".repeat(300);
        let description = describe(Some(&content));
        assert_eq!(description.chars().count(), 203);
        assert!(description.starts_with(&"é".repeat(200)));
    }

    #[test]
    fn short_content_still_gets_ellipsis() {
        assert_eq!(describe(Some("Intro to Go")), "Intro to Go...");
    }

    #[test]
    fn missing_or_empty_content_uses_placeholder() {
        assert_eq!(describe(None), NO_DESCRIPTION);
        assert_eq!(describe(Some("")), NO_DESCRIPTION);
    }

    #[test]
    fn hit_maps_to_resource() {
        let resource = Resource::from(hit("https://youtube.com/watch?v=1", Some("Go in 100 seconds")));
        assert_eq!(resource.title, "A title");
        assert_eq!(resource.kind, ResourceKind::Video);
        assert_eq!(resource.url, "https://youtube.com/watch?v=1");
        assert_eq!(resource.description.as_deref(), Some("Go in 100 seconds..."));
    }

    #[tokio::test]
    async fn search_requests_five_results_and_keeps_order() {
        let mut provider = MockSearchProvider::new();
        provider.expect_search()
            .withf(|query, max| query.to_string() == "go tutorial" && *max == 5)
            .times(1)
            .returning(|_, _| Ok(vec![
                hit("https://go.dev/doc", Some("docs")),
                hit("https://www.youtube.com/watch?v=2", None),
            ]));

        let tool = ResourceSearchTool::new(Arc::new(provider));
        let resources = tool.search("go tutorial").await;

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].kind, ResourceKind::Article);
        assert_eq!(resources[1].kind, ResourceKind::Video);
        assert_eq!(resources[1].description.as_deref(), Some(NO_DESCRIPTION));
    }

    #[tokio::test]
    async fn zero_results_is_an_empty_list() {
        let mut provider = MockSearchProvider::new();
        provider.expect_search().returning(|_, _| Ok(Vec::new()));

        let tool = ResourceSearchTool::new(Arc::new(provider));
        assert!(tool.search("nothing matches").await.is_empty());
    }

    #[tokio::test]
    async fn provider_failure_is_an_empty_list() {
        let mut provider = MockSearchProvider::new();
        provider.expect_search().returning(|_, _| Err(SearchError::Status {
            status: 401,
            body:   "unauthorized".to_string(),
        }));

        let tool = ResourceSearchTool::new(Arc::new(provider));
        assert!(tool.search("go").await.is_empty());
    }

    #[tokio::test]
    async fn max_results_is_clamped() {
        let mut provider = MockSearchProvider::new();
        provider.expect_search()
            .withf(|_, max| *max == MAX_RESULTS)
            .returning(|_, _| Ok(Vec::new()));

        let tool = ResourceSearchTool::new(Arc::new(provider)).with_max_results(50);
        tool.search("go").await;
    }

    #[tokio::test]
    async fn tool_fn_returns_json_array() {
        let mut provider = MockSearchProvider::new();
        provider.expect_search()
            .returning(|_, _| Ok(vec![hit("https://go.dev", Some("The Go site"))]));

        let func = Arc::new(ResourceSearchTool::new(Arc::new(provider))).into_tool_fn();
        let args = HashMap::from([("query".to_string(), json!("go"))]);
        let output = func(args).await.unwrap();

        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["type"], "article");
        assert_eq!(parsed[0]["description"], "The Go site...");
    }

    #[tokio::test]
    async fn tool_fn_rejects_missing_query() {
        let provider = MockSearchProvider::new();
        let func = Arc::new(ResourceSearchTool::new(Arc::new(provider))).into_tool_fn();
        let err = func(HashMap::new()).await.unwrap_err();
        assert!(err.contains("query"));
    }
}
