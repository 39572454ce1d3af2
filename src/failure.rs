use std::fmt::{Display, Formatter};

use crate::EvaluationError;

/// Mutable record written by [`Predicate::satisfies`](crate::Predicate::satisfies)
/// and rendered once a check fails.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FailureMessage {
    /// What the subject was expected to do, e.g. `be empty`.
    pub postfix_message: String,
    /// Rendering of the subject. Filled in from its `Debug` representation
    /// when the predicate leaves it unset.
    pub actual_value: Option<String>,
    /// Set when the subject could not be evaluated.
    pub evaluation_error: Option<String>,
}

impl FailureMessage {
    /// Returns an empty [`FailureMessage`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the subject failed to evaluate.
    pub fn record_error(&mut self, error: &EvaluationError) {
        self.evaluation_error = Some(error.to_string());
    }
}

impl Display for FailureMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "expected to {}", self.postfix_message)?;

        if let Some(error) = &self.evaluation_error {
            write!(f, ", but the actual value could not be evaluated: {error}")
        } else if let Some(actual) = &self.actual_value {
            write!(f, ", got {actual}")
        } else {
            Ok(())
        }
    }
}
