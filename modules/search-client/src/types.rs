use serde::{Deserialize, Serialize};

// --- Provider-neutral results ---

/// A single organic web result, in provider ranking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebHit {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// A single image hit. `image` is the full-size image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageHit {
    pub image: String,
}

// --- DuckDuckGo i.js ---

/// Response body of the DuckDuckGo `i.js` image endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DdgImagesResponse {
    #[serde(default)]
    pub results: Vec<DdgImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DdgImage {
    #[serde(default)]
    pub image: String,
}

impl DdgImage {
    pub fn into_hit(self) -> Option<ImageHit> {
        if self.image.is_empty() {
            return None;
        }
        Some(ImageHit { image: self.image })
    }
}

// --- Serper (Google Search) ---

/// Request body shared by Serper `/search` and `/images`.
#[derive(Debug, Clone, Serialize)]
pub struct SerperRequest {
    pub q: String,
    pub num: usize,
    pub gl: String,
    pub hl: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SerperSearchResponse {
    #[serde(default)]
    pub organic: Vec<SerperOrganic>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SerperOrganic {
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SerperImagesResponse {
    #[serde(default)]
    pub images: Vec<SerperImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SerperImage {
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
}

impl SerperImage {
    pub fn into_hit(self) -> Option<ImageHit> {
        if self.image_url.is_empty() {
            return None;
        }
        Some(ImageHit { image: self.image_url })
    }
}
