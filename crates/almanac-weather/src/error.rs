//! Provider error types.

use almanac_core::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0}: API key is missing")]
    MissingApiKey(&'static str),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

impl ProviderError {
    /// User-friendly error message for console display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingApiKey(_) => {
                "No API key is configured. Register for an API key at the provider's site."
            }
            Self::InvalidRequest(_) => "The request was invalid. Check your input.",
            Self::Network(e) => e.user_message(),
            Self::Parse(_) => "The service returned data in an unexpected format.",
        }
    }
}

/// A response body that could not be turned into a model.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParseError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    pub(crate) fn invalid(field: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}
