use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};
use tracing::warn;

use proposal_common::{Config, ProposalError};
use proposal_core::{ContentGenerator, DocumentRenderer, SearchAdapter};

pub mod error;
pub mod rest;

pub use error::ApiError;

pub struct AppState {
    pub search: SearchAdapter,
    /// `None` when no model key is configured; generation then answers 500.
    pub generator: Option<ContentGenerator>,
    pub renderer: DocumentRenderer,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, ProposalError> {
        let generator = match ContentGenerator::from_config(config) {
            Ok(generator) => Some(generator),
            Err(ProposalError::MissingCredential) => {
                warn!("GOOGLE_API_KEY not set, generation endpoints will fail");
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            search: SearchAdapter::from_config(config)?,
            generator,
            renderer: DocumentRenderer::from_config(config),
            static_dir: config.static_dir.clone(),
        })
    }

    pub fn generator(&self) -> Result<&ContentGenerator, ApiError> {
        self.generator
            .as_ref()
            .ok_or(ApiError::Proposal(ProposalError::MissingCredential))
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let index = ServeFile::new(state.static_dir.join("index.html"));
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        // Front end
        .route_service("/", index)
        .nest_service("/static", assets)
        // Health check
        .route("/health", get(|| async { "ok" }))
        // JSON API
        .route("/api/search", post(rest::api_search))
        .route("/api/images", post(rest::api_images))
        .route("/api/generate", post(rest::api_generate))
        .route("/api/proposal", post(rest::api_proposal))
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
