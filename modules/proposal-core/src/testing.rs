// Test mocks for the proposal pipeline.
//
// Two mocks matching the two trait boundaries:
// - MockSearcher (WebSearcher) — canned text/image results, records queries
// - MockModel (CopyModel) — canned completion text, records prompts
//
// Plus `sample_content()` for a well-formed ProposalContent.

use std::sync::Mutex;

use async_trait::async_trait;

use ai_client::AiError;
use proposal_common::{Benefit, ImageResult, ProposalContent, SearchQuery, SearchResult};
use search_client::SearchError;

use crate::traits::{CopyModel, WebSearcher};

// ---------------------------------------------------------------------------
// MockSearcher
// ---------------------------------------------------------------------------

/// Returns the same results for every query. `failing` makes both searches error.
/// Builder pattern: `.with_text()`, `.with_images()`.
pub struct MockSearcher {
    text: Vec<SearchResult>,
    images: Vec<String>,
    failure: Option<fn() -> SearchError>,
    text_queries: Mutex<Vec<SearchQuery>>,
    image_queries: Mutex<Vec<SearchQuery>>,
}

impl MockSearcher {
    pub fn new() -> Self {
        Self {
            text: Vec::new(),
            images: Vec::new(),
            failure: None,
            text_queries: Mutex::new(Vec::new()),
            image_queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: fn() -> SearchError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new()
        }
    }

    pub fn with_text(mut self, results: Vec<SearchResult>) -> Self {
        self.text = results;
        self
    }

    pub fn with_images(mut self, urls: Vec<String>) -> Self {
        self.images = urls;
        self
    }

    pub fn text_queries(&self) -> Vec<SearchQuery> {
        self.text_queries.lock().unwrap().clone()
    }

    pub fn image_queries(&self) -> Vec<SearchQuery> {
        self.image_queries.lock().unwrap().clone()
    }
}

impl Default for MockSearcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebSearcher for MockSearcher {
    async fn search_text(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, SearchError> {
        self.text_queries.lock().unwrap().push(query.clone());
        if let Some(error) = self.failure {
            return Err(error());
        }
        Ok(self.text.clone())
    }

    // Ignores `query.limit` so callers' own truncation is exercised.
    async fn search_images(&self, query: &SearchQuery) -> Result<Vec<ImageResult>, SearchError> {
        self.image_queries.lock().unwrap().push(query.clone());
        if let Some(error) = self.failure {
            return Err(error());
        }
        Ok(self
            .images
            .iter()
            .map(|url| ImageResult { url: url.clone() })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// MockModel
// ---------------------------------------------------------------------------

/// Returns one canned completion (or error) for every prompt.
pub struct MockModel {
    response: Result<String, fn() -> AiError>,
    prompts: Mutex<Vec<String>>,
}

impl MockModel {
    pub fn returning(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Serializes `content` the way a compliant model would answer.
    pub fn returning_content(content: &ProposalContent) -> Self {
        let text = serde_json::to_string(content).unwrap();
        Self::returning(&text)
    }

    pub fn failing(error: fn() -> AiError) -> Self {
        Self {
            response: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CopyModel for MockModel {
    async fn complete_json(&self, prompt: &str) -> Result<String, AiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(error) => Err(error()),
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Well-formed content for "白米 5kg" at "2000円".
pub fn sample_content() -> ProposalContent {
    ProposalContent {
        catch_copy: "毎日の食卓に、炊きたての甘みを。".to_string(),
        benefits: vec![
            Benefit {
                title: "粒がそろった新米".to_string(),
                detail: "精米したての鮮度で、炊き上がりのツヤと香りが違います。".to_string(),
            },
            Benefit {
                title: "使いやすい5kg袋".to_string(),
                detail: "ご家庭でも店舗でも扱いやすく、保管場所を選びません。".to_string(),
            },
            Benefit {
                title: "安定した品質".to_string(),
                detail: "契約農家の産地指定で、年間を通して味がぶれません。".to_string(),
            },
        ],
        product_name: "白米 5kg".to_string(),
        product_specs: vec![
            "産地: 国内産".to_string(),
            "品種: コシヒカリ".to_string(),
            "内容量: 5kg".to_string(),
            "保存方法: 直射日光を避けて保存".to_string(),
        ],
        price: "2000円".to_string(),
        capacity: Some("5kg".to_string()),
        target: "毎日ごはんを炊くご家庭".to_string(),
        comment: "食味の良さと扱いやすさを両立した定番商品です。自信を持ってお届けします。"
            .to_string(),
    }
}
