use crate::{
    db::{predicate::ast::{CompareOp, Matcher}, query::AggregateFunc},
    model::field::FieldKind,
    traits::FieldRef,
};
use thiserror::Error as ThisError;

///
/// ValidateError
///
/// Caller-recoverable query misuse. Always raised while the query is being
/// built or finalized, before any record is inspected.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidateError {
    #[error("not_in on field '{field}' requires at least one operand")]
    EmptyExclusionSet { field: &'static str },

    #[error("{op} on field '{field}' received a null operand; use is_null/is_not_null")]
    NullOperand { field: &'static str, op: CompareOp },

    #[error("{op} on field '{field}' expects {expected} operand(s), found {found}")]
    OperandArity {
        field: &'static str,
        op: CompareOp,
        expected: usize,
        found: usize,
    },

    #[error("{op} on {expected} field '{field}' received a {found} operand")]
    OperandKindMismatch {
        field: &'static str,
        op: CompareOp,
        expected: FieldKind,
        found: FieldKind,
    },

    #[error("{op} requires a text field, '{field}' is {kind}")]
    TextOperatorOnNonText {
        field: &'static str,
        op: CompareOp,
        kind: FieldKind,
    },

    #[error("{func} aggregation requires a numeric field, '{field}' is {kind}")]
    InvalidFieldForAggregation {
        field: &'static str,
        func: AggregateFunc,
        kind: FieldKind,
    },

    #[error(
        "group_by and aggregate must be set together (group_by: {group_by}, aggregate: {aggregate})"
    )]
    InconsistentGroupAggregateState { group_by: bool, aggregate: bool },
}

/// Validate that `matcher` can be bound to `field`.
///
/// Checks run in a fixed order so a matcher with several problems always
/// reports the same one: text-operator applicability, operand count,
/// operand nullness, operand kind.
pub(crate) fn validate_binding<F: FieldRef>(
    field: F,
    matcher: &Matcher,
) -> Result<(), ValidateError> {
    let name = field.name();
    let kind = field.kind();
    let op = matcher.op;
    let operands = &matcher.operands;

    if op.is_text() && !kind.is_text() {
        return Err(ValidateError::TextOperatorOnNonText {
            field: name,
            op,
            kind,
        });
    }

    match op.arity() {
        Some(expected) if operands.len() != expected => {
            return Err(ValidateError::OperandArity {
                field: name,
                op,
                expected,
                found: operands.len(),
            });
        }
        None if op == CompareOp::NotIn && operands.is_empty() => {
            return Err(ValidateError::EmptyExclusionSet { field: name });
        }
        _ => {}
    }

    if operands.iter().any(|v| v.is_null()) {
        return Err(ValidateError::NullOperand { field: name, op });
    }

    for operand in operands {
        if !operand.fits_kind(kind) {
            return Err(ValidateError::OperandKindMismatch {
                field: name,
                op,
                expected: kind,
                // null was rejected above, so every operand has a kind
                found: operand.kind().unwrap_or(kind),
            });
        }
    }

    Ok(())
}
