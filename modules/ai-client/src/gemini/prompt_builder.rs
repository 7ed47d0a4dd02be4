use tracing::{debug, warn};

use crate::error::{AiError, Result};

use super::types::*;
use super::Gemini;

const JSON_MIME_TYPE: &str = "application/json";

/// One user turn sent with the JSON response-format hint.
pub(crate) struct JsonPrompt {
    agent: Gemini,
    input: String,
}

impl JsonPrompt {
    pub(crate) fn new(agent: Gemini, input: String) -> Self {
        Self { agent, input }
    }

    fn build_request(&self) -> GenerateRequest {
        GenerateRequest::new()
            .content(Content::user(&self.input))
            .response_mime_type(JSON_MIME_TYPE)
    }

    pub(crate) async fn send(self) -> Result<String> {
        let client = self.agent.client()?;
        let request = self.build_request();

        debug!(
            model = %self.agent.model,
            prompt_bytes = self.input.len(),
            "Sending Gemini prompt"
        );

        let response = client.generate(&self.agent.model, &request).await?;

        if let Some(reason) = response.block_reason() {
            warn!(reason, "Gemini blocked the prompt");
            return Err(AiError::Blocked(reason.to_string()));
        }

        match response.text() {
            Some(text) => Ok(text),
            None => {
                warn!(finish_reason = ?response.finish_reason(), "Gemini returned no text");
                Err(AiError::EmptyResponse)
            }
        }
    }
}
