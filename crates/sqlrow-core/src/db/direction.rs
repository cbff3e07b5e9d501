use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

///
/// Direction
///
/// Sort direction of one ordering key. NULL placement does not depend on
/// direction; only present-vs-present comparisons are reversed.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// Apply this direction to a natural ascending ordering.
    #[must_use]
    pub const fn apply(self, natural: Ordering) -> Ordering {
        match self {
            Self::Asc => natural,
            Self::Desc => natural.reverse(),
        }
    }

    #[must_use]
    pub const fn is_desc(self) -> bool {
        matches!(self, Self::Desc)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("ASC"),
            Self::Desc => f.write_str("DESC"),
        }
    }
}
