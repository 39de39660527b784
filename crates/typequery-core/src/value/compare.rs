use crate::value::Value;
use std::cmp::Ordering;

/// Total canonical comparator used by ordering and grouping.
///
/// Ordering rules:
/// 1. Canonical variant rank (`Null` first, integers and floats share a rank)
/// 2. Variant-specific comparison for same-ranked values
///
/// Numbers compare by value, so `-0.0`, `0.0` and `0` are equal. NaN has no
/// numeric order and falls back to IEEE total order so every pair of values
/// stays comparable.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = canonical_rank(left).cmp(&canonical_rank(right));
    if rank != Ordering::Equal {
        return rank;
    }

    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            numeric_cmp(left, right).unwrap_or_else(|| nan_cmp(left, right))
        }
        _ => Ordering::Equal,
    }
}

/// Strict comparator for non-null values of the same kind.
///
/// Returns `None` when either side is null, the kinds do not compare, or a
/// float operand is NaN; predicate evaluation treats `None` as a non-match.
#[must_use]
pub fn strict_order_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Float(_) | Value::Int(_), Value::Float(_) | Value::Int(_)) => {
            numeric_cmp(left, right)
        }
        _ => None,
    }
}

/// Strict equality for non-null values; `None` when either side is null.
#[must_use]
pub fn strict_eq(left: &Value, right: &Value) -> Option<bool> {
    strict_order_cmp(left, right).map(Ordering::is_eq)
}

const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Float(_) | Value::Int(_) => 2,
        Value::Text(_) => 3,
        Value::Timestamp(_) => 4,
    }
}

// 2^63, the first float above every i64.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

// Exact numeric comparison; `None` only when a NaN is involved.
fn numeric_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Int(a), Value::Float(b)) => int_float_cmp(*a, *b),
        (Value::Float(a), Value::Int(b)) => int_float_cmp(*b, *a).map(Ordering::reverse),
        _ => None,
    }
}

// Compares without widening the integer, so values above 2^53 keep their precision.
#[expect(clippy::cast_possible_truncation)]
fn int_float_cmp(int: i64, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= I64_UPPER {
        return Some(Ordering::Less);
    }
    if float < -I64_UPPER {
        return Some(Ordering::Greater);
    }

    // in range, so the truncated value is exactly representable as i64
    let whole = float.trunc();
    let fraction = float - whole;

    Some(int.cmp(&(whole as i64)).then_with(|| {
        if fraction > 0.0 {
            Ordering::Less
        } else if fraction < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }))
}

// NaN sorts by sign: negative NaN before every number, positive NaN after.
fn nan_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = |value: &Value| match value {
        Value::Float(f) if f.is_nan() && f.is_sign_negative() => 0_u8,
        Value::Float(f) if f.is_nan() => 2,
        _ => 1,
    };

    match (left, right) {
        (Value::Float(a), Value::Float(b)) if a.is_nan() && b.is_nan() => a.total_cmp(b),
        _ => rank(left).cmp(&rank(right)),
    }
}
