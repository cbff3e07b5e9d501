//! Row composition and ordering.
//!
//! The planner builds a [`RowTypeBinding`] and a comparer tree over it; the
//! iteration engine produces [`Row`]s against that binding; a sort step
//! orders them through [`QueryComparer`].

pub mod binding;
pub mod expr;
pub mod row;
pub mod sort;

mod direction;

// re-exports
pub use binding::{ExtentBinding, PropertyMapping, RowTypeBinding, TypeBinding, TypeBindingRef};
pub use direction::Direction;
pub use row::Row;
pub use sort::{MultiComparer, QueryComparer, RandomComparer, RowSorter, SingleComparer};
