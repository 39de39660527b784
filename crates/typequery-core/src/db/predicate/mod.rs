//! Module: db::predicate
//! Responsibility: field-scoped comparison AST, bind-time validation, row evaluation.
//! Does not own: matcher factories or plan composition.
//! Boundary: consumed by the query builder (binding) and the executor (filtering).

mod ast;
mod eval;
mod validate;


pub use ast::{CompareOp, Matcher, Predicate};
pub use validate::ValidateError;

pub(crate) use eval::eval_all;
