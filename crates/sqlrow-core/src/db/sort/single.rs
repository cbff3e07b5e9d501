use crate::{
    db::{
        direction::Direction,
        expr::{ExprRef, NavigablePath, ValueExpression, VariableArray, evaluate_checked},
        row::Row,
        sort::ComparerError,
    },
    error::InternalError,
    value::{CollationRef, Literal, default_collation, natural_cmp},
};
use sqlrow_primitives::{TypeCode, ValueFamily};
use std::{cmp::Ordering, sync::Arc};

///
/// SingleComparer
///
/// Orders rows on one key expression. The comparer kind is the value family
/// the key evaluates through; strings follow the configured collation and
/// objects order by identity.
///
/// NULL sorts below every value in both directions. Descending order only
/// swaps the operands of present-vs-present comparisons.
///

#[derive(Debug)]
pub struct SingleComparer {
    kind: ValueFamily,
    direction: Direction,
    expression: ExprRef,
    collation: CollationRef,
}

impl SingleComparer {
    /// Build a comparer of `kind`; the expression must evaluate through it.
    pub fn new(
        kind: ValueFamily,
        expression: ExprRef,
        direction: Direction,
    ) -> Result<Self, InternalError> {
        let actual = expression.type_code();
        if actual.family() != kind {
            return Err(ComparerError::ExpressionKind { kind, actual }.into());
        }

        Ok(Self {
            kind,
            direction,
            expression,
            collation: default_collation(),
        })
    }

    /// Build a comparer whose kind follows the expression's type.
    #[must_use]
    pub fn for_expression(expression: ExprRef, direction: Direction) -> Self {
        Self {
            kind: expression.type_code().family(),
            direction,
            expression,
            collation: default_collation(),
        }
    }

    pub fn binary(expression: ExprRef, direction: Direction) -> Result<Self, InternalError> {
        Self::new(ValueFamily::Binary, expression, direction)
    }

    pub fn boolean(expression: ExprRef, direction: Direction) -> Result<Self, InternalError> {
        Self::new(ValueFamily::Boolean, expression, direction)
    }

    pub fn date_time(expression: ExprRef, direction: Direction) -> Result<Self, InternalError> {
        Self::new(ValueFamily::DateTime, expression, direction)
    }

    pub fn decimal(expression: ExprRef, direction: Direction) -> Result<Self, InternalError> {
        Self::new(ValueFamily::Decimal, expression, direction)
    }

    pub fn double(expression: ExprRef, direction: Direction) -> Result<Self, InternalError> {
        Self::new(ValueFamily::Double, expression, direction)
    }

    pub fn integer(expression: ExprRef, direction: Direction) -> Result<Self, InternalError> {
        Self::new(ValueFamily::Integer, expression, direction)
    }

    pub fn uinteger(expression: ExprRef, direction: Direction) -> Result<Self, InternalError> {
        Self::new(ValueFamily::UInteger, expression, direction)
    }

    pub fn string(expression: ExprRef, direction: Direction) -> Result<Self, InternalError> {
        Self::new(ValueFamily::String, expression, direction)
    }

    pub fn object(expression: ExprRef, direction: Direction) -> Result<Self, InternalError> {
        Self::new(ValueFamily::Object, expression, direction)
    }

    /// Replace the string collation; ignored by non-string kinds.
    #[must_use]
    pub fn with_collation(mut self, collation: CollationRef) -> Self {
        self.collation = collation;
        self
    }

    #[must_use]
    pub const fn kind(&self) -> ValueFamily {
        self.kind
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn type_code(&self) -> TypeCode {
        self.expression.type_code()
    }

    #[must_use]
    pub fn expression(&self) -> &dyn ValueExpression {
        self.expression.as_ref()
    }

    #[must_use]
    pub fn collation(&self) -> &CollationRef {
        &self.collation
    }

    /// Whether the key navigates stored properties directly, so an index on
    /// that path could satisfy this ordering.
    #[must_use]
    pub fn is_path(&self) -> bool {
        self.expression.as_path().is_some()
    }

    #[must_use]
    pub fn path(&self) -> Option<&dyn NavigablePath> {
        self.expression.as_path()
    }

    /// Evaluate the key on `row`.
    pub fn evaluate(&self, row: &Row) -> Result<Literal, InternalError> {
        evaluate_checked(self.expression.as_ref(), row)
    }

    pub fn compare(&self, left: &Row, right: &Row) -> Result<Ordering, InternalError> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        self.compare_keys(&left, &right)
    }

    /// Compare an already-evaluated key against the key of `row`.
    pub fn compare_literal(&self, literal: &Literal, row: &Row) -> Result<Ordering, InternalError> {
        if literal.family() != self.kind {
            return Err(ComparerError::LiteralKind {
                kind: self.kind,
                actual: literal.family(),
            }
            .into());
        }
        let right = self.evaluate(row)?;

        self.compare_keys(literal, &right)
    }

    fn compare_keys(&self, left: &Literal, right: &Literal) -> Result<Ordering, InternalError> {
        match (left.value(), right.value()) {
            (None, None) => Ok(Ordering::Equal),
            (None, Some(_)) => Ok(Ordering::Less),
            (Some(_), None) => Ok(Ordering::Greater),
            (Some(l), Some(r)) => {
                let natural = natural_cmp(l, r, self.collation.as_ref())
                    .ok_or(ComparerError::Incomparable { kind: self.kind })?;

                Ok(self.direction.apply(natural))
            }
        }
    }

    /// Copy this comparer for a re-parameterized plan.
    #[must_use]
    pub fn clone_with(&self, variables: &Arc<VariableArray>) -> Self {
        Self {
            kind: self.kind,
            direction: self.direction,
            expression: self.expression.clone_with(variables),
            collation: Arc::clone(&self.collation),
        }
    }
}
