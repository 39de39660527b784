//! ## Crate layout
//! - `core`: runtime data model, predicates, queries, evaluation, and observability.
//! - `error`: public error taxonomy wrapping the core's validation and internal errors.
//!
//! The `prelude` module carries the vocabulary needed to declare entities
//! and build queries against them.

pub use typequery_core as core;

pub mod error;

pub use core::{db, obs};
pub use error::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        db::{
            executor::{Evaluator as _, ExecutionConfig, MemoryEvaluator},
            query::{
                OrderDirection, Query,
                aggregate::{self, Aggregate},
                matcher,
            },
            response::{RecordList, RecordSet},
            store::{MemoryStore, RecordStore as _, SnapshotSource as _},
        },
        model::field::{FieldKind, FieldModel},
        traits::{EntityKind, FieldRef},
        types::{Id, Timestamp},
        value::Value,
    };
}
