use crate::{
    db::predicate::ast::{CompareOp, Predicate},
    traits::{EntityKind, FieldRef},
    value::{Value, strict_eq, strict_order_cmp},
};
use std::cmp::Ordering;

impl<F: FieldRef> Predicate<F> {
    /// Evaluate this predicate against one record.
    ///
    /// Pure and side-effect free. Every operator except `is_null` is false
    /// when the record's slot is null.
    #[must_use]
    pub fn evaluate<E>(&self, entity: &E) -> bool
    where
        E: EntityKind<Field = F>,
    {
        let actual = entity.get_value(self.field());

        eval_value(&actual, self.op(), self.operands())
    }
}

/// Evaluate a conjunction of predicates; an empty conjunction matches.
#[must_use]
pub(crate) fn eval_all<E: EntityKind>(entity: &E, predicates: &[Predicate<E::Field>]) -> bool {
    predicates.iter().all(|predicate| predicate.evaluate(entity))
}

///
/// Evaluate one operator against a slot value.
///
/// CONTRACT: operands were validated at bind time; comparisons that are
/// still undefined (null slot) evaluate to `false`.
///
pub(crate) fn eval_value(actual: &Value, op: CompareOp, operands: &[Value]) -> bool {
    match op {
        CompareOp::IsNull => return actual.is_null(),
        CompareOp::IsNotNull => return !actual.is_null(),
        _ if actual.is_null() => return false,
        _ => {}
    }

    match (op, operands) {
        (CompareOp::Eq, [v]) => strict_eq(actual, v).unwrap_or(false),
        (CompareOp::Ne, [v]) => strict_eq(actual, v).is_some_and(|eq| !eq),

        (CompareOp::Lt, [v]) => ordered(actual, v, Ordering::is_lt),
        (CompareOp::Lte, [v]) => ordered(actual, v, Ordering::is_le),
        (CompareOp::Gt, [v]) => ordered(actual, v, Ordering::is_gt),
        (CompareOp::Gte, [v]) => ordered(actual, v, Ordering::is_ge),

        (CompareOp::Between, [lo, hi]) => {
            ordered(actual, lo, Ordering::is_ge) && ordered(actual, hi, Ordering::is_le)
        }

        (CompareOp::In, items) => items
            .iter()
            .any(|item| strict_eq(actual, item).unwrap_or(false)),
        (CompareOp::NotIn, items) => items
            .iter()
            .all(|item| strict_eq(actual, item).is_some_and(|eq| !eq)),

        (CompareOp::Contains, [v]) => text(actual, v, |a, n| a.contains(n)),
        (CompareOp::StartsWith, [v]) => text(actual, v, |a, n| a.starts_with(n)),
        (CompareOp::EndsWith, [v]) => text(actual, v, |a, n| a.ends_with(n)),

        // arity is enforced at bind time
        _ => false,
    }
}

fn ordered(actual: &Value, bound: &Value, test: impl FnOnce(Ordering) -> bool) -> bool {
    strict_order_cmp(actual, bound).is_some_and(test)
}

fn text(actual: &Value, needle: &Value, test: impl FnOnce(&str, &str) -> bool) -> bool {
    match (actual.as_text(), needle.as_text()) {
        (Some(actual), Some(needle)) => test(actual, needle),
        _ => false,
    }
}
