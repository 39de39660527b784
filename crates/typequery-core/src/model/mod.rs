//! Runtime data model definitions.
//!
//! Entities describe their slots with `FieldModel`; the engine consults
//! these descriptors when validating predicates, checking aggregates and
//! clearing projected-out fields. Entity code (hand-written or generated)
//! defines *what exists*, `model` defines *what runs*.

pub mod field;
