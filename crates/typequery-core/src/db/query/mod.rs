//! Module: db::query
//! Responsibility: typed query construction and the immutable plan it finalizes into.
//! Does not own: row evaluation.
//! Boundary: `Query` builds, `QueryPlan` is what evaluators consume.

pub mod aggregate;
pub mod builder;
mod fluent;
mod plan;

pub use aggregate::{Aggregate, AggregateFunc};
pub use builder::{Query, QueryError, matcher};
pub use fluent::FluentQuery;
pub use plan::{OrderDirection, OrderKey, OrderTarget, PageSpec, QueryPlan};
