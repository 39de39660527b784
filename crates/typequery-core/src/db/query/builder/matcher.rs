//! Matcher factories.
//!
//! Each factory captures an operator and its operands without a field;
//! binding to a field (`Query::filter`) performs validation. Operands
//! accept anything convertible into `Value`, including `Option<T>` so
//! that a `None` operand can be rejected with a typed error rather than
//! being unrepresentable.

use crate::{
    db::predicate::{CompareOp, Matcher},
    value::Value,
};

fn unary(op: CompareOp, value: impl Into<Value>) -> Matcher {
    Matcher::new(op, vec![value.into()])
}

fn set<I, V>(op: CompareOp, values: I) -> Matcher
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Matcher::new(op, values.into_iter().map(Into::into).collect())
}

// ------------------------------------------------------------------
// Comparison
// ------------------------------------------------------------------

#[must_use]
pub fn eq(value: impl Into<Value>) -> Matcher {
    unary(CompareOp::Eq, value)
}

#[must_use]
pub fn ne(value: impl Into<Value>) -> Matcher {
    unary(CompareOp::Ne, value)
}

#[must_use]
pub fn lt(value: impl Into<Value>) -> Matcher {
    unary(CompareOp::Lt, value)
}

#[must_use]
pub fn lte(value: impl Into<Value>) -> Matcher {
    unary(CompareOp::Lte, value)
}

#[must_use]
pub fn gt(value: impl Into<Value>) -> Matcher {
    unary(CompareOp::Gt, value)
}

#[must_use]
pub fn gte(value: impl Into<Value>) -> Matcher {
    unary(CompareOp::Gte, value)
}

/// Inclusive range `lo <= field <= hi`.
#[must_use]
pub fn between(lo: impl Into<Value>, hi: impl Into<Value>) -> Matcher {
    Matcher::new(CompareOp::Between, vec![lo.into(), hi.into()])
}

// ------------------------------------------------------------------
// Membership
// ------------------------------------------------------------------

/// Membership in a fixed set. An empty set matches no record.
#[must_use]
pub fn in_list<I, V>(values: I) -> Matcher
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    set(CompareOp::In, values)
}

/// Exclusion from a fixed set. An empty set is rejected at bind time.
#[must_use]
pub fn not_in<I, V>(values: I) -> Matcher
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    set(CompareOp::NotIn, values)
}

// ------------------------------------------------------------------
// Text
// ------------------------------------------------------------------

#[must_use]
pub fn contains(value: impl Into<Value>) -> Matcher {
    unary(CompareOp::Contains, value)
}

#[must_use]
pub fn starts_with(value: impl Into<Value>) -> Matcher {
    unary(CompareOp::StartsWith, value)
}

#[must_use]
pub fn ends_with(value: impl Into<Value>) -> Matcher {
    unary(CompareOp::EndsWith, value)
}

// ------------------------------------------------------------------
// Structural
// ------------------------------------------------------------------

#[must_use]
pub const fn is_null() -> Matcher {
    Matcher::new(CompareOp::IsNull, Vec::new())
}

#[must_use]
pub const fn is_not_null() -> Matcher {
    Matcher::new(CompareOp::IsNotNull, Vec::new())
}
