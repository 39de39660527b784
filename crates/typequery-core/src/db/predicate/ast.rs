use crate::{
    db::predicate::validate::{ValidateError, validate_binding},
    traits::FieldRef,
    value::Value,
};
use derive_more::Display;

///
/// Predicate AST
///
/// A predicate is one field-scoped comparison. A query plan holds a flat
/// conjunction of predicates; there is no OR and no predicate negation,
/// only operator-level negation (`Ne`, `NotIn`, `IsNotNull`).
///
/// Predicates are validated when a matcher is bound to its field, so an
/// evaluator only ever sees well-formed predicates.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum CompareOp {
    #[display("eq")]
    Eq = 0x01,
    #[display("ne")]
    Ne = 0x02,
    #[display("lt")]
    Lt = 0x03,
    #[display("lte")]
    Lte = 0x04,
    #[display("gt")]
    Gt = 0x05,
    #[display("gte")]
    Gte = 0x06,
    #[display("between")]
    Between = 0x07,
    #[display("in")]
    In = 0x08,
    #[display("not_in")]
    NotIn = 0x09,
    #[display("contains")]
    Contains = 0x0a,
    #[display("starts_with")]
    StartsWith = 0x0b,
    #[display("ends_with")]
    EndsWith = 0x0c,
    #[display("is_null")]
    IsNull = 0x0d,
    #[display("is_not_null")]
    IsNotNull = 0x0e,
}

impl CompareOp {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Operand count this operator requires; `None` for set operators,
    /// which take any number of operands.
    #[must_use]
    pub const fn arity(self) -> Option<usize> {
        match self {
            Self::IsNull | Self::IsNotNull => Some(0),
            Self::Between => Some(2),
            Self::In | Self::NotIn => None,
            Self::Eq
            | Self::Ne
            | Self::Lt
            | Self::Lte
            | Self::Gt
            | Self::Gte
            | Self::Contains
            | Self::StartsWith
            | Self::EndsWith => Some(1),
        }
    }

    /// Substring operators only apply to text slots.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Contains | Self::StartsWith | Self::EndsWith)
    }
}

///
/// Matcher
///
/// Field-less half of a predicate, produced by the matcher factories
/// (`eq`, `between`, `in_list`, ...). Carries no validation of its own;
/// it becomes a `Predicate` once bound to a field.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Matcher {
    pub(crate) op: CompareOp,
    pub(crate) operands: Vec<Value>,
}

impl Matcher {
    #[must_use]
    pub const fn new(op: CompareOp, operands: Vec<Value>) -> Self {
        Self { op, operands }
    }

    #[must_use]
    pub const fn op(&self) -> CompareOp {
        self.op
    }

    #[must_use]
    pub fn operands(&self) -> &[Value] {
        &self.operands
    }
}

///
/// Predicate
///

#[derive(Clone, Debug, PartialEq)]
pub struct Predicate<F: FieldRef> {
    field: F,
    op: CompareOp,
    operands: Vec<Value>,
}

impl<F: FieldRef> Predicate<F> {
    /// Bind a matcher to a field, validating operand arity, nullness and kind.
    pub fn new(field: F, matcher: Matcher) -> Result<Self, ValidateError> {
        validate_binding(field, &matcher)?;

        let Matcher { op, operands } = matcher;

        Ok(Self {
            field,
            op,
            operands,
        })
    }

    #[must_use]
    pub const fn field(&self) -> F {
        self.field
    }

    #[must_use]
    pub const fn op(&self) -> CompareOp {
        self.op
    }

    #[must_use]
    pub fn operands(&self) -> &[Value] {
        &self.operands
    }
}
