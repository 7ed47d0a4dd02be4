use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

use proposal_common::ProposalError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Proposal(#[from] ProposalError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Proposal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message for the `detail` field. Generation failures share one message;
    /// the cause is only logged.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Proposal(e) if e.is_generation_failure() => {
                "Failed to generate content".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        (status, Json(serde_json::json!({ "detail": self.detail() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_keeps_its_message() {
        let err = ApiError::from(ProposalError::MissingCredential);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.detail(), "Google API Key not found");
    }

    #[test]
    fn generation_failures_share_a_message() {
        for e in [
            ProposalError::Generation("403".into()),
            ProposalError::MalformedOutput("not valid JSON".into()),
            ProposalError::SchemaViolation("expected 3 benefits, got 1".into()),
        ] {
            assert_eq!(ApiError::from(e).detail(), "Failed to generate content");
        }
    }

    #[test]
    fn bad_request_is_4xx() {
        let err = ApiError::BadRequest("product_name must not be empty".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail(), "product_name must not be empty");
    }
}
