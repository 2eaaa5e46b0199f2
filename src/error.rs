//! Widget error types

use thiserror::Error;

/// Errors raised by the widget constructor and setters.
///
/// Every failing call leaves the widget exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WidgetError {
    #[error("{operation}: IllegalArgument - {reason}")]
    IllegalArgument {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation}: NullArgument - {reason}")]
    NullArgument {
        operation: &'static str,
        reason: String,
    },
}

impl WidgetError {
    pub(crate) fn illegal(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::IllegalArgument {
            operation,
            reason: reason.into(),
        }
    }

    pub(crate) fn null(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::NullArgument {
            operation,
            reason: reason.into(),
        }
    }

    /// Re-tag the error with the public operation that surfaced it.
    pub(crate) fn with_operation(self, operation: &'static str) -> Self {
        match self {
            Self::IllegalArgument { reason, .. } => Self::IllegalArgument { operation, reason },
            Self::NullArgument { reason, .. } => Self::NullArgument { operation, reason },
        }
    }

    pub fn is_illegal_argument(&self) -> bool {
        matches!(self, Self::IllegalArgument { .. })
    }

    pub fn is_null_argument(&self) -> bool {
        matches!(self, Self::NullArgument { .. })
    }
}
