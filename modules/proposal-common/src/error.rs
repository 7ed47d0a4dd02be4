use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProposalError {
    #[error("Google API Key not found")]
    MissingCredential,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to generate content: {0}")]
    Generation(String),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProposalError {
    /// Errors raised by the generation stage. These abort the request.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            ProposalError::Generation(_)
                | ProposalError::MalformedOutput(_)
                | ProposalError::SchemaViolation(_)
        )
    }
}
