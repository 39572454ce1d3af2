use std::error::Error;

/// Error raised while evaluating the subject of an
/// [`Expression`](crate::Expression).
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Source(#[from] Box<dyn Error + Send + Sync>),
}

impl EvaluationError {
    /// Returns an [`EvaluationError`] carrying only a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}
