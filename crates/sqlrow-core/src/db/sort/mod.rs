//! Row ordering: single-key, multi-key, and random comparers plus the sort
//! step that drives them.

mod multi;
mod random;
mod single;
mod sorter;


use crate::{
    db::{expr::VariableArray, row::Row},
    error::{ErrorClass, ErrorOrigin, InternalError},
};
use sqlrow_primitives::{TypeCode, ValueFamily};
use std::{cmp::Ordering, sync::Arc};
use thiserror::Error as ThisError;

// re-exports
pub use multi::MultiComparer;
pub use random::RandomComparer;
pub use single::SingleComparer;
pub use sorter::RowSorter;

///
/// ComparerError
///

#[derive(Debug, ThisError)]
pub enum ComparerError {
    #[error("{kind} comparer cannot order an expression of type {actual}")]
    ExpressionKind { kind: ValueFamily, actual: TypeCode },

    #[error("{kind} comparer cannot compare a {actual} literal")]
    LiteralKind {
        kind: ValueFamily,
        actual: ValueFamily,
    },

    #[error("{kind} comparer received values it cannot order")]
    Incomparable { kind: ValueFamily },

    #[error("random source lock poisoned")]
    RandomSourcePoisoned,
}

impl ComparerError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::ExpressionKind { .. } | Self::LiteralKind { .. } => ErrorClass::TypeMismatch,
            Self::Incomparable { .. } => ErrorClass::InvariantViolation,
            Self::RandomSourcePoisoned => ErrorClass::Internal,
        }
    }
}

impl From<ComparerError> for InternalError {
    fn from(err: ComparerError) -> Self {
        Self::new(err.class(), ErrorOrigin::Comparer, err.to_string())
    }
}

///
/// QueryComparer
///
/// Ordering installed on a query: one key, several keys in precedence
/// order, or ORDER BY RANDOM.
///

#[derive(Debug)]
pub enum QueryComparer {
    Single(SingleComparer),
    Multi(MultiComparer),
    Random(RandomComparer),
}

impl QueryComparer {
    pub fn compare(&self, left: &Row, right: &Row) -> Result<Ordering, InternalError> {
        match self {
            Self::Single(c) => c.compare(left, right),
            Self::Multi(c) => c.compare(left, right),
            Self::Random(c) => c.compare(left, right),
        }
    }

    /// Number of ordering keys; random ordering counts as one.
    #[must_use]
    pub fn key_count(&self) -> usize {
        match self {
            Self::Single(_) | Self::Random(_) => 1,
            Self::Multi(c) => c.comparer_count(),
        }
    }

    #[must_use]
    pub fn clone_with(&self, variables: &Arc<VariableArray>) -> Self {
        match self {
            Self::Single(c) => Self::Single(c.clone_with(variables)),
            Self::Multi(c) => Self::Multi(c.clone_with(variables)),
            Self::Random(c) => Self::Random(c.clone_with(variables)),
        }
    }
}

impl From<SingleComparer> for QueryComparer {
    fn from(comparer: SingleComparer) -> Self {
        Self::Single(comparer)
    }
}

impl From<MultiComparer> for QueryComparer {
    fn from(comparer: MultiComparer) -> Self {
        Self::Multi(comparer)
    }
}

impl From<RandomComparer> for QueryComparer {
    fn from(comparer: RandomComparer) -> Self {
        Self::Random(comparer)
    }
}
