use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Json},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use proposal_common::{GenerationContext, ProposalContent, DEFAULT_IMAGE_COUNT};
use proposal_core::{ProposalPipeline, ProposalRequest};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    product_name: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    context: GenerationContext,
}

#[derive(Debug, Deserialize)]
pub struct ImagesRequest {
    product_name: String,
    #[serde(default = "default_image_count")]
    count: usize,
}

fn default_image_count() -> usize {
    DEFAULT_IMAGE_COUNT
}

#[derive(Debug, Serialize)]
pub struct ImagesResponse {
    images: Vec<String>,
}

/// The page also sends its chosen `image_url`; it is not needed here.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    product_name: String,
    price: String,
    #[serde(default)]
    capacity: Option<String>,
    #[serde(default)]
    context: GenerationContext,
}

fn require_name(product_name: &str) -> Result<&str, ApiError> {
    let name = product_name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest(
            "product_name must not be empty".to_string(),
        ));
    }
    Ok(name)
}

pub async fn api_search(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let name = require_name(&body.product_name)?;
    let context = state.search.search_text(name).await;
    Ok(Json(SearchResponse { context }))
}

pub async fn api_images(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ImagesRequest>,
) -> Result<Json<ImagesResponse>, ApiError> {
    let name = require_name(&body.product_name)?;
    let images = state.search.search_images(name, body.count).await;
    Ok(Json(ImagesResponse { images }))
}

pub async fn api_generate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<ProposalContent>, ApiError> {
    let name = require_name(&body.product_name)?;
    let generator = state.generator()?;

    info!(product = name, "Generate request");
    let content = generator
        .generate(name, &body.price, body.capacity.as_deref(), &body.context)
        .await?;
    Ok(Json(content))
}

/// Whole pipeline in one call; responds with the printable document.
pub async fn api_proposal(
    State(state): State<Arc<AppState>>,
    Json(mut body): Json<ProposalRequest>,
) -> Result<Html<String>, ApiError> {
    body.product_name = require_name(&body.product_name)?.to_string();
    let pipeline = ProposalPipeline::new(
        state.search.clone(),
        state.generator()?.clone(),
        state.renderer.clone(),
    );

    let document = pipeline.run(&body).await?;
    Ok(Html(document.into_html()))
}
