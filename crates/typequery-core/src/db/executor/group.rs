//! Module: executor::group
//! Responsibility: partition filtered rows by group key and fold one aggregate per group.
//! Does not own: aggregate/group-by consistency checks (done at plan time).
//! Boundary: returns one representative record per group, in first-appearance order.

use crate::{
    db::{
        executor::ExecutionConfig,
        query::{Aggregate, AggregateFunc},
    },
    error::InternalError,
    model::field::FieldKind,
    traits::{EntityKind, FieldRef},
    value::{Value, canonical_cmp},
};
use std::{cmp::Ordering, collections::BTreeMap};

///
/// GroupKey
///
/// Tuple of one row's group-by values. Ordered by the canonical value
/// order, so values that compare equal share a bucket.
///

#[derive(Clone, Debug)]
struct GroupKey(Vec<Value>);

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .iter()
            .zip(&other.0)
            .map(|(left, right)| canonical_cmp(left, right))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| self.0.len().cmp(&other.0.len()))
    }
}

///
/// GroupState
///
/// First member of the group plus the aggregate field's value from every
/// member, in arrival order.
///

struct GroupState<E: EntityKind> {
    representative: E,
    values: Vec<Value>,
}

impl<E: EntityKind> GroupState<E> {
    fn new(representative: E, value: Value) -> Self {
        Self {
            representative,
            values: vec![value],
        }
    }

    fn finish(self, aggregate: Aggregate<E::Field>) -> Result<E, InternalError> {
        let Self {
            mut representative,
            values,
        } = self;
        let field = aggregate.field();
        let result = fold(aggregate.func(), field.kind(), values)?;

        representative.set_value(field, result)?;

        Ok(representative)
    }
}

/// Partition `rows` by `group_by` and collapse each group to its
/// representative with the aggregate written into the aggregate field.
pub(super) fn group_and_aggregate<E: EntityKind>(
    rows: Vec<E>,
    group_by: &[E::Field],
    aggregate: Aggregate<E::Field>,
    config: &ExecutionConfig,
) -> Result<Vec<E>, InternalError> {
    let field = aggregate.field();
    let mut index: BTreeMap<GroupKey, usize> = BTreeMap::new();
    let mut groups: Vec<GroupState<E>> = Vec::new();

    for row in rows {
        let key = GroupKey(group_by.iter().map(|f| row.get_value(*f)).collect());
        let value = row.get_value(field);

        if let Some(state) = index.get(&key).and_then(|slot| groups.get_mut(*slot)) {
            state.values.push(value);
            continue;
        }

        let attempted = u64::try_from(groups.len())
            .unwrap_or(u64::MAX)
            .saturating_add(1);
        if attempted > config.max_groups {
            return Err(InternalError::executor_unsupported(format!(
                "grouped evaluation of '{}' exceeded max_groups: attempted={attempted}, limit={}",
                E::ENTITY_NAME,
                config.max_groups,
            )));
        }

        index.insert(key, groups.len());
        groups.push(GroupState::new(row, value));
    }

    groups
        .into_iter()
        .map(|state| state.finish(aggregate))
        .collect()
}

/// Reduce one group's aggregate-field values to the value written back
/// into a slot of `kind`.
pub(super) fn fold(
    func: AggregateFunc,
    kind: FieldKind,
    values: Vec<Value>,
) -> Result<Value, InternalError> {
    let members = values.len();
    let present: Vec<Value> = values.into_iter().filter(|v| !v.is_null()).collect();

    match func {
        AggregateFunc::Max => Ok(present
            .into_iter()
            .max_by(canonical_cmp)
            .unwrap_or(Value::Null)),
        AggregateFunc::Min => Ok(present
            .into_iter()
            .min_by(canonical_cmp)
            .unwrap_or(Value::Null)),
        AggregateFunc::Sum if present.is_empty() => Ok(Value::Null),
        AggregateFunc::Sum => sum_value(kind, &present),
        AggregateFunc::Avg if present.is_empty() => Ok(Value::Null),
        AggregateFunc::Avg => avg_value(kind, &present),
        AggregateFunc::Count => count_value(kind, members),
    }
}

#[expect(clippy::cast_precision_loss)]
fn count_value(kind: FieldKind, members: usize) -> Result<Value, InternalError> {
    match kind {
        FieldKind::Int => i64::try_from(members)
            .map(Value::Int)
            .map_err(|_| InternalError::executor_internal("group count exceeds int range")),
        FieldKind::Float => Ok(Value::Float(members as f64)),
        _ => Err(non_numeric(AggregateFunc::Count, kind)),
    }
}

fn sum_value(kind: FieldKind, values: &[Value]) -> Result<Value, InternalError> {
    match kind {
        FieldKind::Int => {
            let mut total: i64 = 0;
            for value in values {
                total = total
                    .checked_add(int_operand(value)?)
                    .ok_or_else(|| InternalError::executor_internal("integer sum overflow"))?;
            }

            Ok(Value::Int(total))
        }
        FieldKind::Float => Ok(Value::Float(float_operands(values)?.iter().sum())),
        _ => Err(non_numeric(AggregateFunc::Sum, kind)),
    }
}

#[expect(clippy::cast_precision_loss)]
fn avg_value(kind: FieldKind, values: &[Value]) -> Result<Value, InternalError> {
    match kind {
        FieldKind::Int => {
            // i128 holds any sum of i64 values a group can produce
            let mut total: i128 = 0;
            for value in values {
                total += i128::from(int_operand(value)?);
            }
            let len = i128::try_from(values.len())
                .map_err(|_| InternalError::executor_internal("group size exceeds i128 range"))?;

            i64::try_from(total / len)
                .map(Value::Int)
                .map_err(|_| InternalError::executor_internal("integer average out of range"))
        }
        FieldKind::Float => {
            let operands = float_operands(values)?;
            let total: f64 = operands.iter().sum();

            Ok(Value::Float(total / operands.len() as f64))
        }
        _ => Err(non_numeric(AggregateFunc::Avg, kind)),
    }
}

fn int_operand(value: &Value) -> Result<i64, InternalError> {
    value.as_int().ok_or_else(|| {
        InternalError::executor_invariant(format!(
            "expected int aggregate operand, found {value:?}"
        ))
    })
}

fn float_operands(values: &[Value]) -> Result<Vec<f64>, InternalError> {
    values
        .iter()
        .map(|value| {
            value.as_f64().ok_or_else(|| {
                InternalError::executor_invariant(format!(
                    "expected numeric aggregate operand, found {value:?}"
                ))
            })
        })
        .collect()
}

fn non_numeric(func: AggregateFunc, kind: FieldKind) -> InternalError {
    InternalError::executor_invariant(format!(
        "{func} reached evaluation on non-numeric field kind {kind}"
    ))
}
