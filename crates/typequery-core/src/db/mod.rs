//! Query engine: predicates, plan construction, evaluation and storage seams.

pub mod executor;
pub mod predicate;
pub mod query;
pub mod response;
pub mod store;
