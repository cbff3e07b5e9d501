use crate::{
    db::{expr::VariableArray, row::Row, sort::SingleComparer},
    error::{ErrorOrigin, InternalError},
};
use sqlrow_primitives::TypeCode;
use std::{cmp::Ordering, sync::Arc};

///
/// MultiComparer
///
/// Ordered sort keys with lexicographic tie-breaking: the first key that
/// does not tie decides. List order is key precedence.
///

#[derive(Debug, Default)]
pub struct MultiComparer {
    comparers: Vec<SingleComparer>,
}

impl MultiComparer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            comparers: Vec::new(),
        }
    }

    /// Append the next lower-precedence key.
    pub fn push(&mut self, comparer: SingleComparer) {
        self.comparers.push(comparer);
    }

    #[must_use]
    pub fn then(mut self, comparer: SingleComparer) -> Self {
        self.push(comparer);
        self
    }

    #[must_use]
    pub fn comparer_count(&self) -> usize {
        self.comparers.len()
    }

    pub fn comparer(&self, index: usize) -> Result<&SingleComparer, InternalError> {
        self.comparers.get(index).ok_or_else(|| {
            InternalError::out_of_range(
                ErrorOrigin::Comparer,
                "comparer",
                index,
                self.comparers.len(),
            )
        })
    }

    pub fn comparer_type_code(&self, index: usize) -> Result<TypeCode, InternalError> {
        Ok(self.comparer(index)?.type_code())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SingleComparer> {
        self.comparers.iter()
    }

    pub fn compare(&self, left: &Row, right: &Row) -> Result<Ordering, InternalError> {
        for comparer in &self.comparers {
            let ordering = comparer.compare(left, right)?;

            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }

        Ok(Ordering::Equal)
    }

    /// Copy every key for a re-parameterized plan, preserving precedence.
    #[must_use]
    pub fn clone_with(&self, variables: &Arc<VariableArray>) -> Self {
        Self {
            comparers: self
                .comparers
                .iter()
                .map(|c| c.clone_with(variables))
                .collect(),
        }
    }
}

impl From<SingleComparer> for MultiComparer {
    fn from(comparer: SingleComparer) -> Self {
        Self {
            comparers: vec![comparer],
        }
    }
}

impl FromIterator<SingleComparer> for MultiComparer {
    fn from_iter<I: IntoIterator<Item = SingleComparer>>(iter: I) -> Self {
        Self {
            comparers: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MultiComparer {
    type Item = &'a SingleComparer;
    type IntoIter = std::slice::Iter<'a, SingleComparer>;

    fn into_iter(self) -> Self::IntoIter {
        self.comparers.iter()
    }
}
