//! Core runtime for TypeQuery: entity traits, values, the query builder,
//! the in-memory evaluator, and the vocabulary exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod traits;
pub mod types;
pub mod value;


///
/// Prelude
///
/// Prelude contains the query vocabulary: builders, factories, and the
/// traits an entity implements. Errors and evaluators stay one level down.
///

pub mod prelude {
    pub use crate::{
        db::query::{
            OrderDirection, Query,
            aggregate::{self, Aggregate},
            matcher,
        },
        model::field::{FieldKind, FieldModel},
        traits::{EntityKind, FieldRef},
        types::{Id, Timestamp},
        value::Value,
    };
}
