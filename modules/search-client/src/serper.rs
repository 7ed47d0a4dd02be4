//! Serper (Google Search) client. Needs an API key.

use std::time::Duration;

use crate::error::{Result, SearchError};
use crate::types::{
    ImageHit, SerperImagesResponse, SerperRequest, SerperSearchResponse, WebHit,
};
use crate::{build_http_client, ensure_success};

const BASE_URL: &str = "https://google.serper.dev";

pub struct SerperClient {
    client: reqwest::Client,
    api_key: String,
    gl: String,
    hl: String,
    base_url: String,
}

impl SerperClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SearchError::NotConfigured("SERPER_API_KEY is empty".into()));
        }
        Ok(Self {
            client: build_http_client(timeout)?,
            api_key,
            gl: "jp".to_string(),
            hl: "ja".to_string(),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Country (`gl`) and interface language (`hl`) for result ranking.
    pub fn with_locale(mut self, gl: impl Into<String>, hl: impl Into<String>) -> Self {
        self.gl = gl.into();
        self.hl = hl.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn request(&self, query: &str, num: usize) -> SerperRequest {
        SerperRequest {
            q: query.to_string(),
            num,
            gl: self.gl.clone(),
            hl: self.hl.clone(),
        }
    }

    async fn post<T: serde::de::DeserializeOwned>(&self, path: &str, body: &SerperRequest) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        let resp = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(body)
            .send()
            .await?;
        let text = ensure_success(resp).await?.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn search(&self, query: &str, max_results: usize) -> Result<Vec<WebHit>> {
        if max_results == 0 {
            return Ok(Vec::new());
        }
        tracing::info!(query, max_results, "Serper search");

        let data: SerperSearchResponse = self.post("search", &self.request(query, max_results)).await?;
        let hits: Vec<WebHit> = data
            .organic
            .into_iter()
            .take(max_results)
            .map(|r| WebHit {
                title: r.title,
                snippet: r.snippet,
                url: r.link,
            })
            .collect();

        tracing::info!(query, count = hits.len(), "Serper search complete");
        Ok(hits)
    }

    pub async fn images(&self, query: &str, max_results: usize) -> Result<Vec<ImageHit>> {
        if max_results == 0 {
            return Ok(Vec::new());
        }
        tracing::info!(query, max_results, "Serper image search");

        let data: SerperImagesResponse = self.post("images", &self.request(query, max_results)).await?;
        let hits: Vec<ImageHit> = data
            .images
            .into_iter()
            .filter_map(|i| i.into_hit())
            .take(max_results)
            .collect();

        tracing::info!(query, count = hits.len(), "Serper image search complete");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_key() {
        let err = SerperClient::new("", Duration::from_secs(1)).err().unwrap();
        assert!(matches!(err, SearchError::NotConfigured(_)));
    }

    #[test]
    fn request_carries_locale() {
        let client = SerperClient::new("key", Duration::from_secs(1))
            .unwrap()
            .with_locale("us", "en");
        let body = serde_json::to_value(client.request("rice", 5)).unwrap();
        assert_eq!(body["q"], "rice");
        assert_eq!(body["num"], 5);
        assert_eq!(body["gl"], "us");
        assert_eq!(body["hl"], "en");
    }

    #[test]
    fn image_response_drops_entries_without_url() {
        let raw = r#"{"images": [
            {"title": "a", "imageUrl": "https://img.example/a.jpg", "imageWidth": 600, "imageHeight": 400},
            {"title": "b"}
        ]}"#;
        let data: SerperImagesResponse = serde_json::from_str(raw).unwrap();
        let hits: Vec<ImageHit> = data.images.into_iter().filter_map(|i| i.into_hit()).collect();
        assert_eq!(
            hits,
            vec![ImageHit {
                image: "https://img.example/a.jpg".to_string()
            }]
        );
    }
}
