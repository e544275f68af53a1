use agent_studio_harness::HarnessError;

use crate::media::MediaError;

/// Failure of one generation attempt. Every variant is scoped to that
/// attempt; none is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// No API credential is configured; no request was attempted.
    #[error("API key is not configured. Please set the API_KEY environment variable.")]
    NotConfigured,
    /// The uploaded file could not be turned into a media part.
    #[error("could not prepare media: {0}")]
    Media(#[from] MediaError),
    /// The AI service call failed.
    #[error("AI service error: {0}")]
    Service(HarnessError),
    /// The service answered without a usable payload.
    #[error("{0}")]
    EmptyResult(String),
    /// The structured storyboard response could not be parsed.
    #[error("could not parse storyboard scenes: {0}")]
    Parse(String),
}

impl GenerationError {
    /// Short machine-friendly code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotConfigured => "generation.not_configured",
            Self::Media(_) => "generation.media",
            Self::Service(_) => "generation.service",
            Self::EmptyResult(_) => "generation.empty_result",
            Self::Parse(_) => "generation.parse",
        }
    }
}

impl From<HarnessError> for GenerationError {
    fn from(value: HarnessError) -> Self {
        match value {
            HarnessError::EmptyOutput(message) => GenerationError::EmptyResult(message),
            other => GenerationError::Service(other),
        }
    }
}
