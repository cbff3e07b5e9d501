//! Projection schema: property mappings and the row type binding that owns
//! them.

mod property;
mod row_type;

#[cfg(test)]
mod tests;

use crate::error::{ErrorClass, ErrorOrigin, InternalError};
use std::{fmt, sync::Arc};
use thiserror::Error as ThisError;

// re-exports
pub use property::PropertyMapping;
pub use row_type::RowTypeBinding;

/// Shared handle to one joined or nested schema.
pub type TypeBindingRef = Arc<dyn TypeBinding>;

///
/// TypeBinding
///
/// Schema of one source a row can draw from: a stored extent or a nested
/// row projection.
///

pub trait TypeBinding: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn property_count(&self) -> usize;

    /// Nested row projection, when this schema is one.
    fn as_row_type(&self) -> Option<&RowTypeBinding> {
        None
    }
}

///
/// ExtentBinding
///
/// Schema of one stored extent, described by its type name and declared
/// property names.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtentBinding {
    name: String,
    properties: Vec<String>,
}

impl ExtentBinding {
    pub fn new<I, S>(name: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    #[must_use]
    pub fn into_ref(self) -> TypeBindingRef {
        Arc::new(self)
    }
}

impl TypeBinding for ExtentBinding {
    fn name(&self) -> &str {
        &self.name
    }

    fn property_count(&self) -> usize {
        self.properties.len()
    }
}

///
/// BindingError
///

#[derive(Debug, ThisError)]
pub enum BindingError {
    #[error("property name must not be empty")]
    EmptyPropertyName,

    #[error("property name '{0}' is already bound")]
    DuplicatePropertyName(String),

    #[error("property '{property}' reads extent {extent} but only {extents} extents are joined")]
    UnknownExtent {
        property: String,
        extent: usize,
        extents: usize,
    },

    #[error("extent order is not set")]
    ExtentOrderNotSet,

    #[error("extent order {order:?} is not a permutation of the {extents} joined extents")]
    InvalidExtentOrder { order: Vec<usize>, extents: usize },
}

impl BindingError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::EmptyPropertyName | Self::InvalidExtentOrder { .. } => {
                ErrorClass::InvalidArgument
            }
            Self::DuplicatePropertyName(_)
            | Self::UnknownExtent { .. }
            | Self::ExtentOrderNotSet => ErrorClass::InvariantViolation,
        }
    }
}

impl From<BindingError> for InternalError {
    fn from(err: BindingError) -> Self {
        Self::new(err.class(), ErrorOrigin::Binding, err.to_string())
    }
}
