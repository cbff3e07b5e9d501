//! Stored-object contract.
//!
//! The object heap lives outside this crate. Rows only need a stable
//! numeric identity, a type name for diagnostics, and by-name property
//! reads for path navigation.

use crate::{
    error::{ErrorOrigin, InternalError},
    value::{Literal, ScalarValue},
};
use sqlrow_primitives::ValueFamily;
use std::{fmt, sync::Arc};

/// Shared handle to one stored object.
pub type ObjectRef = Arc<dyn ObjectView>;

///
/// ObjectView
///
/// Read surface of one stored object as seen by query execution.
///

pub trait ObjectView: fmt::Debug + Send + Sync {
    /// Stable numeric identity; object comparers order by this value.
    fn object_id(&self) -> u64;

    fn type_name(&self) -> &str;

    /// Read one property by name as a typed nullable literal.
    fn property(&self, name: &str) -> Result<Literal, InternalError>;

    /// Navigate to the extension object registered at `index`.
    fn get_extension(&self, index: usize) -> Result<Option<ObjectRef>, InternalError> {
        let _ = index;

        Err(InternalError::unsupported(
            ErrorOrigin::Expression,
            format!("type {} exposes no extensions", self.type_name()),
        ))
    }

    /// Text used by row rendering and the string accessor.
    fn render(&self) -> String {
        format!("{}({})", self.type_name(), self.object_id())
    }
}

///
/// StoredObject
///
/// In-memory object view: ordered named properties plus optional
/// extensions. Used by embedders that materialize heap objects eagerly.
///

#[derive(Debug)]
pub struct StoredObject {
    id: u64,
    type_name: String,
    properties: Vec<(String, Literal)>,
    extensions: Vec<ObjectRef>,
}

impl StoredObject {
    pub fn new(id: u64, type_name: impl Into<String>) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            properties: Vec::new(),
            extensions: Vec::new(),
        }
    }

    /// Add or replace one property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: Literal) -> Self {
        let name = name.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.properties.push((name, value)),
        }

        self
    }

    #[must_use]
    pub fn with_extension(mut self, extension: ObjectRef) -> Self {
        self.extensions.push(extension);
        self
    }

    #[must_use]
    pub fn into_ref(self) -> ObjectRef {
        Arc::new(self)
    }
}

impl ObjectView for StoredObject {
    fn object_id(&self) -> u64 {
        self.id
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn property(&self, name: &str) -> Result<Literal, InternalError> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| {
                InternalError::expression_invariant(format!(
                    "type {} has no property named {name}",
                    self.type_name
                ))
            })
    }

    fn get_extension(&self, index: usize) -> Result<Option<ObjectRef>, InternalError> {
        if index < self.extensions.len() {
            Ok(Some(Arc::clone(&self.extensions[index])))
        } else {
            Ok(None)
        }
    }
}

/// Wrap an object handle into an object-family literal.
#[must_use]
pub fn object_literal(object: Option<ObjectRef>) -> Literal {
    match object {
        Some(object) => Literal::present(ScalarValue::Object(object)),
        None => Literal::null(ValueFamily::Object),
    }
}
