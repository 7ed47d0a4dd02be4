use thiserror::Error;

pub type Result<T> = std::result::Result<T, AiError>;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Response blocked: {0}")]
    Blocked(String),

    #[error("Empty response from model")]
    EmptyResponse,
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        AiError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for AiError {
    fn from(e: serde_json::Error) -> Self {
        AiError::Parse(e.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for AiError {
    fn from(e: reqwest::header::InvalidHeaderValue) -> Self {
        AiError::Config(format!("invalid API key header: {e}"))
    }
}

