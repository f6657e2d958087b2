//! Error taxonomy for quizforge.
//!
//! Every failure the engine reports to a caller is one of these. None of them
//! are retried internally; the boundary layer decides how to surface them.

use thiserror::Error;

/// Errors returned by the quiz engine.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The question id is not in the store.
    #[error("question not found: {0}")]
    NotFound(String),

    /// The request cannot be served (e.g. the allow-list matches no problem).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The engine could not be built. Fatal; the process must not serve.
    #[error("startup failure: {0:#}")]
    Startup(anyhow::Error),
}

impl QuizError {
    /// Returns `true` if the caller caused this error and could fix the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, QuizError::NotFound(_) | QuizError::InvalidRequest(_))
    }
}

impl From<anyhow::Error> for QuizError {
    fn from(err: anyhow::Error) -> Self {
        QuizError::Startup(err)
    }
}
