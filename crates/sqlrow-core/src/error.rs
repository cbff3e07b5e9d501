use sqlrow_primitives::TypeCode;
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Every failure in this crate aborts the current query; nothing retries.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: ErrorDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Construct an expression-origin invariant violation.
    pub(crate) fn expression_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Expression,
            message,
        )
    }

    /// Construct an internal error for a poisoned or otherwise broken runtime
    /// primitive.
    pub(crate) fn internal(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, origin, message)
    }

    /// Construct a type-mismatch error.
    pub(crate) fn type_mismatch(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::TypeMismatch, origin, message)
    }

    /// Construct a construction-time argument error.
    pub(crate) fn invalid_argument(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvalidArgument, origin, message)
    }

    /// Construct an out-of-range error carrying the offending index.
    pub(crate) fn out_of_range(origin: ErrorOrigin, what: &str, index: usize, len: usize) -> Self {
        let message = if len == 0 {
            format!("{what} index is out of range (empty): {index}")
        } else {
            format!("{what} index is out of range (0 - {}): {index}", len - 1)
        };

        Self::new(ErrorClass::OutOfRange, origin, message)
            .with_detail(ErrorDetail::OutOfRange { index, len })
    }

    /// Construct a not-found error for a named lookup.
    pub(crate) fn not_found(origin: ErrorOrigin, name: impl Into<String>) -> Self {
        let name = name.into();

        Self::new(
            ErrorClass::NotFound,
            origin,
            format!("there is no property with name: {name}"),
        )
        .with_detail(ErrorDetail::NotFound { name })
    }

    /// Construct an unsupported-operation error.
    pub(crate) fn unsupported(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unsupported, origin, message)
    }

    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self.class, ErrorClass::TypeMismatch)
    }

    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(self.class, ErrorClass::InvariantViolation)
    }

    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self.class, ErrorClass::OutOfRange)
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, class-specific error detail carried by [`InternalError`].
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ErrorDetail {
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: String,
        actual: TypeCode,
        index: Option<usize>,
    },

    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("name not found: {name}")]
    NotFound { name: String },
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvariantViolation,
    TypeMismatch,
    InvalidArgument,
    NotFound,
    OutOfRange,
    Unsupported,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvariantViolation => "invariant_violation",
            Self::TypeMismatch => "type_mismatch",
            Self::InvalidArgument => "invalid_argument",
            Self::NotFound => "not_found",
            Self::OutOfRange => "out_of_range",
            Self::Unsupported => "unsupported",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Binding,
    Row,
    Expression,
    Comparer,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Binding => "binding",
            Self::Row => "row",
            Self::Expression => "expression",
            Self::Comparer => "comparer",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_bounds_and_index() {
        let err = InternalError::out_of_range(ErrorOrigin::Row, "property", 7, 3);

        assert!(err.is_out_of_range());
        assert_eq!(err.message, "property index is out of range (0 - 2): 7");
        assert_eq!(
            err.detail,
            Some(ErrorDetail::OutOfRange { index: 7, len: 3 })
        );
    }

    #[test]
    fn out_of_range_on_empty_collection_does_not_underflow() {
        let err = InternalError::out_of_range(ErrorOrigin::Binding, "type binding", 0, 0);

        assert_eq!(err.message, "type binding index is out of range (empty): 0");
    }

    #[test]
    fn display_with_class_prefixes_origin_and_class() {
        let err = InternalError::not_found(ErrorOrigin::Binding, "Age");

        assert!(err.is_not_found());
        assert_eq!(
            err.display_with_class(),
            "binding:not_found: there is no property with name: Age"
        );
    }
}
