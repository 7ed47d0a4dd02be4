//! Search → generate → render, once per request.
//!
//! Search failures degrade to empty context and the placeholder image.
//! A generation failure is terminal: the run ends in `Stage::Failed` and no
//! document is produced.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use proposal_common::{
    Config, GenerationContext, ProposalContent, ProposalDocument, ProposalError,
    PLACEHOLDER_IMAGE_URL,
};

use crate::generator::ContentGenerator;
use crate::renderer::DocumentRenderer;
use crate::search::SearchAdapter;

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Searching,
    Generating,
    Rendering,
    Done,
    Failed,
}

impl Stage {
    /// Forward edges plus `Generating → Failed`. `Done` and `Failed` absorb.
    pub fn can_advance_to(self, next: Stage) -> bool {
        matches!(
            (self, next),
            (Stage::Idle, Stage::Searching)
                | (Stage::Searching, Stage::Generating)
                | (Stage::Generating, Stage::Rendering)
                | (Stage::Generating, Stage::Failed)
                | (Stage::Rendering, Stage::Done)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Searching => write!(f, "searching"),
            Self::Generating => write!(f, "generating"),
            Self::Rendering => write!(f, "rendering"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Lifecycle of one run. Records every stage entered.
#[derive(Debug, Clone)]
pub struct RunTrace {
    product: String,
    stages: Vec<Stage>,
}

impl RunTrace {
    fn new(product: &str) -> Self {
        Self {
            product: product.to_string(),
            stages: vec![Stage::Idle],
        }
    }

    pub fn current(&self) -> Stage {
        self.stages.last().copied().unwrap_or(Stage::Idle)
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    fn advance(&mut self, next: Stage) {
        let from = self.current();
        debug_assert!(from.can_advance_to(next), "illegal transition {from} -> {next}");
        info!(product = self.product.as_str(), from = %from, to = %next, "Pipeline stage");
        self.stages.push(next);
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Inputs for one proposal. `image_url` skips the image search when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRequest {
    pub product_name: String,
    pub price: String,
    #[serde(default)]
    pub capacity: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ProposalRequest {
    pub fn new(product_name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            price: price.into(),
            capacity: None,
            image_url: None,
        }
    }

    pub fn with_capacity(mut self, capacity: impl Into<String>) -> Self {
        self.capacity = Some(capacity.into());
        self
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    fn supplied_image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct ProposalPipeline {
    search: SearchAdapter,
    generator: ContentGenerator,
    renderer: DocumentRenderer,
}

impl ProposalPipeline {
    pub fn new(
        search: SearchAdapter,
        generator: ContentGenerator,
        renderer: DocumentRenderer,
    ) -> Self {
        Self {
            search,
            generator,
            renderer,
        }
    }

    /// Configured providers. Fails with `MissingCredential` when no model key is set.
    pub fn from_config(config: &Config) -> Result<Self, ProposalError> {
        Ok(Self::new(
            SearchAdapter::from_config(config)?,
            ContentGenerator::from_config(config)?,
            DocumentRenderer::from_config(config),
        ))
    }

    pub fn search(&self) -> &SearchAdapter {
        &self.search
    }

    pub fn generator(&self) -> &ContentGenerator {
        &self.generator
    }

    pub fn renderer(&self) -> &DocumentRenderer {
        &self.renderer
    }

    pub async fn run(&self, request: &ProposalRequest) -> Result<ProposalDocument, ProposalError> {
        self.run_traced(request).await.0
    }

    /// `run`, also returning the stages the run passed through.
    pub async fn run_traced(
        &self,
        request: &ProposalRequest,
    ) -> (Result<ProposalDocument, ProposalError>, RunTrace) {
        let mut trace = RunTrace::new(&request.product_name);

        trace.advance(Stage::Searching);
        let (context, image_url) = self.gather(request).await;

        trace.advance(Stage::Generating);
        let content = match self.generate(request, &context).await {
            Ok(content) => content,
            Err(e) => {
                error!(product = request.product_name.as_str(), error = %e, "Proposal aborted");
                trace.advance(Stage::Failed);
                return (Err(e), trace);
            }
        };

        trace.advance(Stage::Rendering);
        let document = self
            .renderer
            .render(&request.product_name, &content, &image_url);

        trace.advance(Stage::Done);
        (Ok(document), trace)
    }

    /// Context text plus the image to show. Never fails.
    async fn gather(&self, request: &ProposalRequest) -> (GenerationContext, String) {
        let context = self.search.search_text(&request.product_name).await;

        let image_url = match request.supplied_image() {
            Some(url) => url.to_string(),
            None => match self.search.first_image(&request.product_name).await {
                Some(url) => url,
                None => {
                    info!(
                        product = request.product_name.as_str(),
                        "Using placeholder image"
                    );
                    PLACEHOLDER_IMAGE_URL.to_string()
                }
            },
        };

        (context, image_url)
    }

    async fn generate(
        &self,
        request: &ProposalRequest,
        context: &GenerationContext,
    ) -> Result<ProposalContent, ProposalError> {
        self.generator
            .generate(
                &request.product_name,
                &request.price,
                request.capacity.as_deref(),
                context,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_is_reachable_only_from_generating() {
        let all = [
            Stage::Idle,
            Stage::Searching,
            Stage::Generating,
            Stage::Rendering,
            Stage::Done,
            Stage::Failed,
        ];
        for from in all {
            assert_eq!(
                from.can_advance_to(Stage::Failed),
                from == Stage::Generating,
                "{from} -> failed"
            );
        }
    }

    #[test]
    fn terminal_stages_absorb() {
        for next in [Stage::Idle, Stage::Searching, Stage::Generating, Stage::Rendering] {
            assert!(!Stage::Done.can_advance_to(next));
            assert!(!Stage::Failed.can_advance_to(next));
        }
        assert!(Stage::Done.is_terminal());
        assert!(Stage::Failed.is_terminal());
        assert!(!Stage::Rendering.is_terminal());
    }

    #[test]
    fn search_cannot_skip_generation() {
        assert!(!Stage::Searching.can_advance_to(Stage::Rendering));
        assert!(!Stage::Searching.can_advance_to(Stage::Done));
        assert!(!Stage::Idle.can_advance_to(Stage::Generating));
    }

    #[test]
    fn request_deserializes_without_optional_fields() {
        let req: ProposalRequest =
            serde_json::from_str(r#"{"product_name": "白米 5kg", "price": "2000円"}"#).unwrap();
        assert_eq!(req, ProposalRequest::new("白米 5kg", "2000円"));
        assert!(req.supplied_image().is_none());
    }

    #[test]
    fn blank_image_is_not_a_supplied_image() {
        let req = ProposalRequest::new("白米", "1円").with_image("  ");
        assert!(req.supplied_image().is_none());
        let req = ProposalRequest::new("白米", "1円").with_image(" https://img.example/a.jpg ");
        assert_eq!(req.supplied_image(), Some("https://img.example/a.jpg"));
    }
}
