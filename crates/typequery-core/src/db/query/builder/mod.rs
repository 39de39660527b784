//! Module: query::builder
//! Responsibility: value-semantics query builder and matcher factories.
//! Does not own: predicate evaluation or plan execution.
//! Boundary: validates field bindings as they are added.

pub mod matcher;
mod query;


pub use query::{Query, QueryError};
