//! Best-effort search. Provider errors are logged and collapse to empty
//! results here; nothing above this module sees a `SearchError`.

use std::sync::Arc;

use tracing::{info, warn};

use proposal_common::{Config, GenerationContext, ProposalError, SearchProviderKind, SearchQuery};
use search_client::{DuckDuckGoClient, SerperClient};

use crate::context::build_context;
use crate::traits::WebSearcher;

#[derive(Clone)]
pub struct SearchAdapter {
    searcher: Arc<dyn WebSearcher>,
    region: String,
}

impl SearchAdapter {
    pub fn new(searcher: Arc<dyn WebSearcher>, region: impl Into<String>) -> Self {
        Self {
            searcher,
            region: region.into(),
        }
    }

    /// Build the configured provider (DuckDuckGo unless Serper is selected).
    pub fn from_config(config: &Config) -> Result<Self, ProposalError> {
        let searcher: Arc<dyn WebSearcher> = match config.search_provider {
            SearchProviderKind::DuckDuckGo => Arc::new(
                DuckDuckGoClient::new(config.search_timeout)
                    .map_err(|e| ProposalError::Config(e.to_string()))?,
            ),
            SearchProviderKind::Serper => {
                let key = config.serper_api_key.clone().ok_or_else(|| {
                    ProposalError::Config("SERPER_API_KEY is not set".to_string())
                })?;
                Arc::new(
                    SerperClient::new(key, config.search_timeout)
                        .map_err(|e| ProposalError::Config(e.to_string()))?
                        .with_locale(config.search_country(), config.search_language.clone()),
                )
            }
        };
        Ok(Self::new(searcher, config.search_region.clone()))
    }

    /// Background text for `product_name`. Empty on failure or no results.
    pub async fn search_text(&self, product_name: &str) -> GenerationContext {
        info!(product = product_name, "Searching for product information");
        let query = SearchQuery::for_text(product_name, &self.region);

        match self.searcher.search_text(&query).await {
            Ok(results) if results.is_empty() => {
                warn!(product = product_name, "No search results found");
                GenerationContext::empty()
            }
            Ok(results) => {
                info!(product = product_name, count = results.len(), "Search results collected");
                build_context(&results)
            }
            Err(e) => {
                warn!(product = product_name, error = %e, "Search failed");
                GenerationContext::empty()
            }
        }
    }

    /// Up to `count` image URLs for `product_name`. Empty on failure.
    pub async fn search_images(&self, product_name: &str, count: usize) -> Vec<String> {
        info!(product = product_name, count, "Searching for product images");
        if count == 0 {
            return Vec::new();
        }
        let query = SearchQuery::for_images(product_name, &self.region, count);

        match self.searcher.search_images(&query).await {
            Ok(images) => {
                let mut urls: Vec<String> = images
                    .into_iter()
                    .map(|i| i.url)
                    .filter(|u| !u.is_empty())
                    .collect();
                urls.truncate(count);
                if urls.is_empty() {
                    warn!(product = product_name, "No images found");
                }
                urls
            }
            Err(e) => {
                warn!(product = product_name, error = %e, "Image search failed");
                Vec::new()
            }
        }
    }

    /// The top image for `product_name`, if any.
    pub async fn first_image(&self, product_name: &str) -> Option<String> {
        self.search_images(product_name, 1).await.into_iter().next()
    }
}
