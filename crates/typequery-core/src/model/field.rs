use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// FieldModel
/// Runtime field metadata used by validation, aggregation and projection.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldModel {
    /// Field name as used in diagnostics and by statement lowering.
    pub name: &'static str,
    /// Declared value kind of the slot.
    pub kind: FieldKind,
    /// Whether the slot may hold `Value::Null` in a persisted record.
    pub nullable: bool,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind, nullable: bool) -> Self {
        Self {
            name,
            kind,
            nullable,
        }
    }

    #[must_use]
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, kind, false)
    }

    #[must_use]
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, kind, true)
    }
}

///
/// FieldKind
///
/// Closed set of scalar value kinds an entity slot may declare.
/// Aligned with the non-null `Value` variants.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum FieldKind {
    #[display("bool")]
    Bool,
    #[display("float")]
    Float,
    #[display("int")]
    Int,
    #[display("text")]
    Text,
    #[display("timestamp")]
    Timestamp,
}

impl FieldKind {
    /// Numeric kinds support `sum`, `avg` and `count` aggregation.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }

    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }
}
