mod compare;


use crate::{model::field::FieldKind, types::Timestamp};
use serde::{Deserialize, Serialize};

// re-exports
pub use compare::{canonical_cmp, strict_eq, strict_order_cmp};

///
/// Value
/// can be used in WHERE statements and as aggregate output
///
/// Null → the slot holds no value (SQL NULL).
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Float(f64),
    Int(i64),
    Null,
    Text(String),
    Timestamp(Timestamp),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Kind of a non-null value; `None` for `Null`.
    #[must_use]
    pub const fn kind(&self) -> Option<FieldKind> {
        match self {
            Self::Bool(_) => Some(FieldKind::Bool),
            Self::Float(_) => Some(FieldKind::Float),
            Self::Int(_) => Some(FieldKind::Int),
            Self::Null => None,
            Self::Text(_) => Some(FieldKind::Text),
            Self::Timestamp(_) => Some(FieldKind::Timestamp),
        }
    }

    /// Whether this value may be compared against a slot of `kind`.
    ///
    /// Integer values widen into float slots; every other pairing is strict.
    /// `Null` never fits, operands must be non-null.
    #[must_use]
    pub fn fits_kind(&self, kind: FieldKind) -> bool {
        match (self.kind(), kind) {
            (Some(FieldKind::Int), FieldKind::Float) => true,
            (Some(actual), expected) => actual == expected,
            (None, _) => false,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view used by float arithmetic; integers widen.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Value a projected-out slot of `kind` is cleared to.
    ///
    /// Text slots become the empty string; every other kind becomes null,
    /// regardless of declared nullability.
    #[must_use]
    pub fn cleared(kind: FieldKind) -> Self {
        if kind.is_text() {
            Self::Text(String::new())
        } else {
            Self::Null
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
