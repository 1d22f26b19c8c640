use thiserror::Error;

use crate::workflow::Step;

/// Errors produced by the session workflow and the inference orchestrator
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("event `{event}` is not valid in step {step:?}")]
    InvalidTransition { step: Step, event: &'static str },

    #[error("missing required fields: {}", .0.join(", "))]
    MissingRequiredFields(Vec<String>),

    #[error("nothing to generate in step {step:?}")]
    NothingToGenerate { step: Step },

    #[error("inference endpoint unavailable: {0}")]
    EndpointUnavailable(String),

    #[error("inference endpoint returned an empty completion")]
    EmptyCompletion,

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("session {0} changed while the request was in flight")]
    StaleSession(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl FlowError {
    /// True for the failures that the UI answers with the static fallback message.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            FlowError::EndpointUnavailable(_) | FlowError::EmptyCompletion
        )
    }
}

pub type Result<T> = std::result::Result<T, FlowError>;
