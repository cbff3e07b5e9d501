use crate::{
    db::{
        binding::{BindingError, TypeBindingRef},
        expr::{ExprRef, ValueExpression, VariableArray},
    },
    error::InternalError,
};
use sqlrow_primitives::TypeCode;
use std::sync::Arc;

///
/// PropertyMapping
///
/// One projected column: a stable name and position bound to the expression
/// that computes it. Immutable once built; owned by its `RowTypeBinding`.
///

#[derive(Debug)]
pub struct PropertyMapping {
    name: String,
    index: usize,
    display_name: String,
    type_code: TypeCode,
    type_binding: Option<TypeBindingRef>,
    expression: ExprRef,
}

impl PropertyMapping {
    pub fn new(
        name: impl Into<String>,
        index: usize,
        expression: ExprRef,
    ) -> Result<Self, InternalError> {
        let name = name.into();
        if name.is_empty() {
            return Err(BindingError::EmptyPropertyName.into());
        }

        let display_name = display_name_for(&name, expression.as_ref());

        Ok(Self {
            type_code: expression.type_code(),
            type_binding: expression.type_binding(),
            name,
            index,
            display_name,
            expression,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Column header shown to users.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub const fn type_code(&self) -> TypeCode {
        self.type_code
    }

    #[must_use]
    pub fn type_binding(&self) -> Option<&TypeBindingRef> {
        self.type_binding.as_ref()
    }

    #[must_use]
    pub fn expression(&self) -> &dyn ValueExpression {
        self.expression.as_ref()
    }

    pub(crate) fn clone_with(&self, variables: &Arc<VariableArray>) -> Self {
        Self {
            name: self.name.clone(),
            index: self.index,
            display_name: self.display_name.clone(),
            type_code: self.type_code,
            type_binding: self.type_binding.clone(),
            expression: self.expression.clone_with(variables),
        }
    }
}

// Positional placeholder names start with a digit; a path-capable
// expression then lends its terminal property name.
fn display_name_for(name: &str, expression: &dyn ValueExpression) -> String {
    let positional = name.starts_with(|c: char| c.is_ascii_digit());

    match expression.as_path() {
        Some(path) if positional => path.name().to_string(),
        _ => name.to_string(),
    }
}
