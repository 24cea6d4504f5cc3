//! Web search tool.
//!
//! Searches for a query, fetches the result pages, and returns their text as
//! context for the model, collecting every fetched URL into the `urls`
//! accumulator. Per-URL fetch failures are skipped; a search that yields no
//! usable content at all degrades to the canned headline dataset so research
//! runs never come back empty-handed.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::state::{ActivityType, ExecutionEvent, StateUpdate};
use crate::tools::headlines::canned_headlines;
use crate::tools::{Tool, ToolContext, ToolError, ToolOutcome, ToolSpec};

const SEARCH_URL: &str = "https://api.duckduckgo.com/";
/// Cap on extracted text per page, matching the tool's context budget.
const PAGE_TEXT_LIMIT: usize = 4000;

/// One search result.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
}

/// Search backend seam, so tests and demos run without the network.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, ToolError>;

    /// Fetches one result page and returns its extracted text.
    async fn fetch_page(&self, url: &str) -> Result<String, ToolError>;
}

/// Live provider over the DuckDuckGo instant-answer API plus plain page GETs.
pub struct HttpSearchProvider {
    client: reqwest::Client,
}

impl HttpSearchProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Strips markup from an HTML body, keeping the visible text.
    fn extract_text(html: &str) -> String {
        let mut text = String::new();
        let mut in_tag = false;
        for c in html.chars() {
            match c {
                '<' => in_tag = true,
                '>' => {
                    in_tag = false;
                    text.push(' ');
                }
                c if !in_tag => text.push(c),
                _ => {}
            }
            if text.len() >= PAGE_TEXT_LIMIT {
                break;
            }
        }
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for HttpSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, ToolError> {
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[("q", query), ("format", "json"), ("no_html", "1")])
            .send()
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;

        let mut hits = Vec::new();
        if let Some(topics) = body["RelatedTopics"].as_array() {
            for topic in topics {
                let (Some(url), Some(text)) = (topic["FirstURL"].as_str(), topic["Text"].as_str())
                else {
                    continue;
                };
                hits.push(SearchHit {
                    title: text.to_string(),
                    url: url.to_string(),
                });
                if hits.len() >= max_results {
                    break;
                }
            }
        }
        Ok(hits)
    }

    async fn fetch_page(&self, url: &str) -> Result<String, ToolError> {
        let body = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?
            .text()
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;
        Ok(Self::extract_text(&body))
    }
}

/// Fixed-result provider for tests and offline demos.
#[derive(Default)]
pub struct StaticSearchProvider {
    hits: Vec<SearchHit>,
    pages: std::collections::HashMap<String, String>,
}

impl StaticSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hit(mut self, title: &str, url: &str, page_text: &str) -> Self {
        self.hits.push(SearchHit {
            title: title.to_string(),
            url: url.to_string(),
        });
        self.pages.insert(url.to_string(), page_text.to_string());
        self
    }
}

#[async_trait]
impl SearchProvider for StaticSearchProvider {
    async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<SearchHit>, ToolError> {
        Ok(self.hits.iter().take(max_results).cloned().collect())
    }

    async fn fetch_page(&self, url: &str) -> Result<String, ToolError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ToolError::Transport(format!("no page for {}", url)))
    }
}

/// The `web_search` tool.
pub struct WebSearchTool {
    provider: Arc<dyn SearchProvider>,
    max_results: usize,
}

impl WebSearchTool {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            max_results: 5,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "web_search".to_string(),
            description: Some(
                "Search the web for the given query and return page text with source URLs."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "The search query" }
                },
                "required": ["query"]
            }),
        }
    }

    fn wants_state(&self) -> bool {
        true
    }

    async fn call(&self, args: Value, ctx: ToolContext<'_>) -> Result<ToolOutcome, ToolError> {
        let query = args["query"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("query must be a string".into()))?;

        let mut context = String::new();
        let mut update = StateUpdate::default();

        let hits = match self.provider.search(query, self.max_results).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(query, error = %e, "search failed");
                Vec::new()
            }
        };

        for hit in &hits {
            match self.provider.fetch_page(&hit.url).await {
                Ok(text) if !text.is_empty() => {
                    context.push_str(&format!("\nSource: {}\n\nContent: {}\n", hit.url, text));
                    update.urls.push(hit.url.clone());
                }
                Ok(_) => debug!(url = %hit.url, "page had no extractable text"),
                Err(e) => debug!(url = %hit.url, error = %e, "skipping unfetchable page"),
            }
        }

        if context.is_empty() {
            // Nothing usable came back; serve the canned sector headlines so
            // the model still has material to reason over.
            let symbol = ctx.state.map(|s| s.subject.as_str()).unwrap_or(query);
            warn!(query, symbol, "search produced no content, serving canned headlines");
            update.execution_log.push(ExecutionEvent::failure(
                "web_search fallback".to_string(),
                ActivityType::Tool,
                "search produced no content".to_string(),
            ));
            context = canned_headlines(symbol);
        }

        Ok(ToolOutcome::response_with(context, update))
    }
}
