//! Runtime row instances over a projection schema.

mod access;


use crate::{
    config::ExecutionConfig,
    db::binding::RowTypeBinding,
    error::{ErrorClass, ErrorDetail, ErrorOrigin, InternalError},
    object::ObjectRef,
    value::NULL_LABEL,
};
use sqlrow_primitives::TypeCode;
use std::{cell::Cell, fmt::Write as _, sync::Arc};
use thiserror::Error as ThisError;

///
/// RowError
///

#[derive(Debug, ThisError)]
pub enum RowError {
    #[error("cannot read property {index} of type {actual} as {accessor}")]
    TypeMismatch {
        accessor: TypeCode,
        actual: TypeCode,
        index: usize,
    },

    #[error("value {value} of property {index} ({actual}) does not fit {accessor}")]
    ValueOutOfRange {
        accessor: TypeCode,
        actual: TypeCode,
        index: usize,
        value: String,
    },

    #[error("rows do not expose extension navigation")]
    ExtensionUnsupported,
}

impl RowError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::TypeMismatch { .. } | Self::ValueOutOfRange { .. } => ErrorClass::TypeMismatch,
            Self::ExtensionUnsupported => ErrorClass::Unsupported,
        }
    }

    fn detail(&self) -> Option<ErrorDetail> {
        match self {
            Self::TypeMismatch {
                accessor,
                actual,
                index,
            }
            | Self::ValueOutOfRange {
                accessor,
                actual,
                index,
                ..
            } => Some(ErrorDetail::TypeMismatch {
                expected: accessor.to_string(),
                actual: *actual,
                index: Some(*index),
            }),
            Self::ExtensionUnsupported => None,
        }
    }
}

impl From<RowError> for InternalError {
    fn from(err: RowError) -> Self {
        let detail = err.detail();
        let error = Self::new(err.class(), ErrorOrigin::Row, err.to_string());

        match detail {
            Some(detail) => error.with_detail(detail),
            None => error,
        }
    }
}

///
/// Row
///
/// One candidate tuple seen through its projection schema. Property values
/// are computed on demand from the attached extent objects; nothing is
/// materialized.
///
/// A row is owned by one iteration at a time: attaching objects needs
/// `&mut`, and the cached random key lives in a `Cell`, so rows are `Send`
/// but not `Sync`.
///

#[derive(Debug)]
pub struct Row {
    binding: Arc<RowTypeBinding>,
    objects: Vec<Option<ObjectRef>>,
    random_key: Cell<Option<u32>>,
}

impl Row {
    /// Build a row with one empty object slot per joined extent.
    #[must_use]
    pub fn new(binding: Arc<RowTypeBinding>) -> Self {
        let objects = vec![None; binding.type_binding_count()];

        Self {
            binding,
            objects,
            random_key: Cell::new(None),
        }
    }

    #[must_use]
    pub const fn binding(&self) -> &Arc<RowTypeBinding> {
        &self.binding
    }

    #[must_use]
    pub fn extent_count(&self) -> usize {
        self.objects.len()
    }

    /// Bind the object for `extent` in the current candidate tuple.
    pub fn attach_object(
        &mut self,
        extent: usize,
        object: Option<ObjectRef>,
    ) -> Result<(), InternalError> {
        let len = self.objects.len();
        let slot = self
            .objects
            .get_mut(extent)
            .ok_or_else(|| InternalError::out_of_range(ErrorOrigin::Row, "extent", extent, len))?;
        *slot = object;

        Ok(())
    }

    /// Object currently bound for `extent`; `None` when the slot is empty.
    pub fn access_object(&self, extent: usize) -> Result<Option<&ObjectRef>, InternalError> {
        self.objects
            .get(extent)
            .map(Option::as_ref)
            .ok_or_else(|| {
                InternalError::out_of_range(ErrorOrigin::Row, "extent", extent, self.objects.len())
            })
    }

    /// Rows never expose extension navigation.
    pub fn get_extension(&self, index: usize) -> Result<Option<ObjectRef>, InternalError> {
        let _ = index;

        Err(RowError::ExtensionUnsupported.into())
    }

    /// Forget cached per-row state before the row takes part in a new pass.
    pub fn reset_cached(&self) {
        self.random_key.set(None);
    }

    pub(crate) fn random_key(&self) -> Option<u32> {
        self.random_key.get()
    }

    pub(crate) fn set_random_key(&self, key: u32) {
        self.random_key.set(Some(key));
    }

    ///
    /// RENDERING
    ///

    /// One `DisplayName = value` line per property.
    pub fn render(&self) -> Result<String, InternalError> {
        self.render_with_null(NULL_LABEL)
    }

    /// Render with the NULL label configured for this execution.
    pub fn render_with_config(&self, config: &ExecutionConfig) -> Result<String, InternalError> {
        self.render_with_null(&config.null_label)
    }

    pub fn render_with_null(&self, null_label: &str) -> Result<String, InternalError> {
        let mut out = String::new();
        for property in self.binding.properties() {
            let value = self.value_at(property.index())?;
            let _ = writeln!(
                out,
                "{} = {}",
                property.display_name(),
                value.render_with_null(null_label)
            );
        }

        Ok(out)
    }
}
