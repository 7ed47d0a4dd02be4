mod client;
mod prompt_builder;
pub(crate) mod types;

use std::time::Duration;

use crate::error::{AiError, Result};

use client::GeminiClient;
use prompt_builder::JsonPrompt;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

// =============================================================================
// Gemini Agent
// =============================================================================

#[derive(Clone)]
pub struct Gemini {
    api_key: String,
    pub(crate) model: String,
    base_url: Option<String>,
    timeout: Duration,
}

impl std::fmt::Debug for Gemini {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gemini")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Gemini {
    /// Build a client for `model`. An empty key is rejected up front so no
    /// request is ever sent without a credential.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AiError::Config("Gemini API key is empty".to_string()));
        }
        Ok(Self {
            api_key,
            model: model.into(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn client(&self) -> Result<GeminiClient> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| AiError::Config(format!("failed to build HTTP client: {e}")))?;
        let client = GeminiClient::new(&self.api_key, http);
        Ok(match self.base_url {
            Some(ref url) => client.with_base_url(url),
            None => client,
        })
    }

    /// Single-turn prompt with the JSON response-format hint set. Returns the
    /// raw model text; parsing is left to the caller.
    pub async fn complete_json(&self, prompt: &str) -> Result<String> {
        JsonPrompt::new(self.clone(), prompt.to_string()).send().await
    }
}
