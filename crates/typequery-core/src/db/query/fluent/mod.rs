//! Module: query::fluent
//! Responsibility: fluent source-bound query wrapper.
//! Does not own: plan construction or evaluation semantics.
//! Boundary: ergonomic API layer over `Query` and `MemoryEvaluator`.

mod load;

pub use load::FluentQuery;
