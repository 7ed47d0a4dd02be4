// Trait seams for the pipeline's two outbound dependencies.
//
// WebSearcher: text and image lookup against a search provider.
// CopyModel: one structured-output completion against a generative model.
//
// Mocks for both live in `testing` so the pipeline runs with no network.

use async_trait::async_trait;

use ai_client::{AiError, Gemini};
use proposal_common::{ImageResult, SearchQuery, SearchResult};
use search_client::{DuckDuckGoClient, SearchError, SerperClient};

// ---------------------------------------------------------------------------
// WebSearcher
// ---------------------------------------------------------------------------

#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Organic results for `query.terms`, at most `query.limit`.
    async fn search_text(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, SearchError>;

    /// Image URLs for `query.terms`, at most `query.limit`.
    async fn search_images(&self, query: &SearchQuery) -> Result<Vec<ImageResult>, SearchError>;
}

#[async_trait]
impl WebSearcher for DuckDuckGoClient {
    async fn search_text(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, SearchError> {
        let hits = self.text(&query.terms, &query.region, query.limit).await?;
        Ok(hits
            .into_iter()
            .map(|h| SearchResult {
                title: h.title,
                snippet: h.snippet,
                url: h.url,
            })
            .collect())
    }

    async fn search_images(&self, query: &SearchQuery) -> Result<Vec<ImageResult>, SearchError> {
        let hits = self.images(&query.terms, &query.region, query.limit).await?;
        Ok(hits.into_iter().map(|h| ImageResult { url: h.image }).collect())
    }
}

// Serper's locale is fixed when the client is built; `query.region` is not consulted.
#[async_trait]
impl WebSearcher for SerperClient {
    async fn search_text(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, SearchError> {
        let hits = self.search(&query.terms, query.limit).await?;
        Ok(hits
            .into_iter()
            .map(|h| SearchResult {
                title: h.title,
                snippet: h.snippet,
                url: h.url,
            })
            .collect())
    }

    async fn search_images(&self, query: &SearchQuery) -> Result<Vec<ImageResult>, SearchError> {
        let hits = self.images(&query.terms, query.limit).await?;
        Ok(hits.into_iter().map(|h| ImageResult { url: h.image }).collect())
    }
}

// ---------------------------------------------------------------------------
// CopyModel
// ---------------------------------------------------------------------------

#[async_trait]
pub trait CopyModel: Send + Sync {
    /// Send `prompt` with the JSON response-format hint and return the raw text.
    async fn complete_json(&self, prompt: &str) -> Result<String, AiError>;
}

#[async_trait]
impl CopyModel for Gemini {
    async fn complete_json(&self, prompt: &str) -> Result<String, AiError> {
        Gemini::complete_json(self, prompt).await
    }
}
