use std::collections::BTreeSet;

///
/// ExtentSet
///
/// Extent numbers one expression depends on. Filled by
/// `ValueExpression::instantiate_extent_set`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExtentSet {
    included: BTreeSet<usize>,
}

impl ExtentSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            included: BTreeSet::new(),
        }
    }

    pub fn include(&mut self, extent: usize) {
        self.included.insert(extent);
    }

    #[must_use]
    pub fn contains(&self, extent: usize) -> bool {
        self.included.contains(&extent)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.included.len()
    }

    pub fn clear(&mut self) {
        self.included.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.included.iter().copied()
    }

    /// Return the included extent that appears last in `order`.
    #[must_use]
    pub fn last_included(&self, order: &[usize]) -> Option<usize> {
        order
            .iter()
            .rev()
            .copied()
            .find(|extent| self.contains(*extent))
    }
}
