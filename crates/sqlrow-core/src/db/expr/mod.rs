//! Value-expression contract consumed by rows and comparers.
//!
//! Expression trees are built by the planner. This module defines the
//! evaluation surface rows and comparers call through, plus the small node
//! set needed to project stored paths, attached objects, constants, and
//! parameters.

mod extent;
mod node;
mod variable;


use crate::{
    db::{binding::TypeBindingRef, row::Row},
    error::{ErrorDetail, ErrorOrigin, InternalError},
    object::ObjectRef,
    types::{Binary, DateTime, Decimal},
    value::Literal,
};
use sqlrow_primitives::TypeCode;
use std::{fmt, sync::Arc};

// re-exports
pub use extent::ExtentSet;
pub use node::{Constant, ExtentObject, ExtentPath, Variable};
pub use variable::VariableArray;

/// Owned expression node.
pub type ExprRef = Box<dyn ValueExpression>;

///
/// ValueExpression
///
/// One typed node of a value-expression tree. `evaluate` must return a
/// literal of `type_code().family()`.
///

pub trait ValueExpression: fmt::Debug + Send + Sync {
    fn type_code(&self) -> TypeCode;

    fn evaluate(&self, row: &Row) -> Result<Literal, InternalError>;

    /// Deep-copy this node against a new variable array.
    fn clone_with(&self, variables: &Arc<VariableArray>) -> ExprRef;

    /// Record every extent this expression reads from.
    fn instantiate_extent_set(&self, extents: &mut ExtentSet);

    /// Path-navigation capability; `None` for computed expressions.
    fn as_path(&self) -> Option<&dyn NavigablePath> {
        None
    }

    /// Nested schema when the result is itself an object or row.
    fn type_binding(&self) -> Option<TypeBindingRef> {
        None
    }

    ///
    /// TYPED EVALUATION
    ///

    fn evaluate_to_binary(&self, row: &Row) -> Result<Option<Binary>, InternalError> {
        evaluate_checked(self, row)?.to_binary()
    }

    fn evaluate_to_boolean(&self, row: &Row) -> Result<Option<bool>, InternalError> {
        evaluate_checked(self, row)?.to_boolean()
    }

    fn evaluate_to_date_time(&self, row: &Row) -> Result<Option<DateTime>, InternalError> {
        evaluate_checked(self, row)?.to_date_time()
    }

    fn evaluate_to_decimal(&self, row: &Row) -> Result<Option<Decimal>, InternalError> {
        evaluate_checked(self, row)?.to_decimal()
    }

    fn evaluate_to_double(&self, row: &Row) -> Result<Option<f64>, InternalError> {
        evaluate_checked(self, row)?.to_double()
    }

    fn evaluate_to_integer(&self, row: &Row) -> Result<Option<i64>, InternalError> {
        evaluate_checked(self, row)?.to_integer()
    }

    fn evaluate_to_uinteger(&self, row: &Row) -> Result<Option<u64>, InternalError> {
        evaluate_checked(self, row)?.to_uinteger()
    }

    fn evaluate_to_string(&self, row: &Row) -> Result<Option<String>, InternalError> {
        evaluate_checked(self, row)?.to_string_value()
    }

    fn evaluate_to_object(&self, row: &Row) -> Result<Option<ObjectRef>, InternalError> {
        evaluate_checked(self, row)?.to_object()
    }
}

///
/// NavigablePath
///
/// Capability of expressions that navigate stored properties directly.
/// Consumers use it to decide whether an index can satisfy an ordering.
///

pub trait NavigablePath {
    /// Extent the navigation starts from.
    fn extent_number(&self) -> usize;

    /// Terminal property name.
    fn name(&self) -> &str;

    /// Dotted navigation chain.
    fn full_path(&self) -> String;
}

/// Evaluate and verify the literal family matches the declared type code.
pub fn evaluate_checked<E>(expr: &E, row: &Row) -> Result<Literal, InternalError>
where
    E: ValueExpression + ?Sized,
{
    let literal = expr.evaluate(row)?;
    let expected = expr.type_code().family();
    if literal.family() != expected {
        return Err(InternalError::type_mismatch(
            ErrorOrigin::Expression,
            format!(
                "expression declared as {} evaluated to {}",
                expr.type_code(),
                literal.family()
            ),
        )
        .with_detail(ErrorDetail::TypeMismatch {
            expected: expected.to_string(),
            actual: literal.family().canonical_type_code(),
            index: None,
        }));
    }

    Ok(literal)
}
