//! Row composition and ordering for in-memory SQL query execution over an
//! object database: projection schemas, on-demand rows with typed accessors,
//! and the comparers and sort step that order them.
#![warn(unreachable_pub)]

pub mod config;
pub mod db;
pub mod error;
pub mod object;
pub mod obs;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Vocabulary a planner needs to build bindings, rows, and comparers.
///

pub mod prelude {
    pub use crate::{
        config::ExecutionConfig,
        db::{
            Direction, MultiComparer, PropertyMapping, QueryComparer, RandomComparer, Row,
            RowSorter, RowTypeBinding, SingleComparer,
            expr::{Constant, ExtentObject, ExtentPath, ValueExpression, Variable, VariableArray},
        },
        error::InternalError,
        object::{ObjectRef, ObjectView, StoredObject},
        value::{ColumnValue, Literal},
    };
    pub use sqlrow_primitives::{TypeCode, ValueFamily};
}
