//! Error types for a validation pass
//!
//! Ordinary violations never surface as errors on their own; they accumulate
//! in [`ConstraintViolations`], which is returned once as the aggregate
//! failure. [`ValidationError`] adds the second way a pass can end: an
//! asynchronous predicate that failed to produce an answer, which aborts the
//! whole pass.

use thiserror::Error;

use super::violation::ConstraintViolations;

/// Boxed error produced by a failing asynchronous predicate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Outcome of a failed asynchronous validation pass.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The pass completed and found violations.
    #[error(transparent)]
    Invalid(#[from] ConstraintViolations),

    /// A predicate could not be evaluated; the pass stopped immediately.
    #[error("validation aborted: {0}")]
    Aborted(#[source] BoxError),
}

impl ValidationError {
    /// Wraps a predicate failure.
    pub fn aborted(error: impl Into<BoxError>) -> Self {
        Self::Aborted(error.into())
    }

    /// Returns the violation set when the pass completed.
    #[must_use]
    pub fn violations(&self) -> Option<&ConstraintViolations> {
        match self {
            Self::Invalid(violations) => Some(violations),
            Self::Aborted(_) => None,
        }
    }

    /// Returns true when the pass was aborted by a predicate failure.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_aborted_keeps_source() {
        let error = ValidationError::aborted("remote check timed out");
        assert!(error.is_aborted());
        assert!(error.violations().is_none());
        assert_eq!(error.to_string(), "validation aborted: remote check timed out");
        assert!(error.source().is_some());
    }

    #[test]
    fn test_invalid_from_violations() {
        let error = ValidationError::from(ConstraintViolations::new());
        assert!(!error.is_aborted());
        assert_eq!(error.violations().map(ConstraintViolations::len), Some(0));
    }
}
