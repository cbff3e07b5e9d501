use std::{cmp::Ordering, fmt, sync::Arc};

///
/// Collation
///
/// String ordering rules used by string comparers. Locale-aware rules are
/// supplied by the embedder; the crate ships ordinal and case-insensitive
/// variants.
///
/// Implementations must be a total order: antisymmetric and transitive.
///

pub trait Collation: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn compare(&self, left: &str, right: &str) -> Ordering;
}

/// Shared collation handle.
pub type CollationRef = Arc<dyn Collation>;

///
/// OrdinalCollation
/// Byte-wise comparison of UTF-8 text.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct OrdinalCollation;

impl Collation for OrdinalCollation {
    fn name(&self) -> &str {
        "ordinal"
    }

    fn compare(&self, left: &str, right: &str) -> Ordering {
        left.cmp(right)
    }
}

///
/// CaseInsensitiveCollation
/// Lowercased comparison with an ordinal tie-break so distinct strings never
/// compare equal.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CaseInsensitiveCollation;

impl Collation for CaseInsensitiveCollation {
    fn name(&self) -> &str {
        "case_insensitive"
    }

    fn compare(&self, left: &str, right: &str) -> Ordering {
        let folded = left
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(right.chars().flat_map(char::to_lowercase));

        folded.then_with(|| left.cmp(right))
    }
}

/// Collation used when a string comparer is built without one.
#[must_use]
pub fn default_collation() -> CollationRef {
    Arc::new(OrdinalCollation)
}
