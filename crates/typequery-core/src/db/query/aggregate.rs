use crate::{db::predicate::ValidateError, traits::FieldRef};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// AggregateFunc
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum AggregateFunc {
    #[display("max")]
    Max,
    #[display("min")]
    Min,
    #[display("count")]
    Count,
    #[display("sum")]
    Sum,
    #[display("avg")]
    Avg,
}

impl AggregateFunc {
    /// Whether the function writes an arithmetic result back into the slot.
    ///
    /// `max`/`min` return one of the group's own values and work on every
    /// kind; the others need a numeric slot to hold their result.
    #[must_use]
    pub const fn requires_numeric(self) -> bool {
        matches!(self, Self::Count | Self::Sum | Self::Avg)
    }
}

///
/// Aggregate
///
/// One reduction over one field, applied per group. The result overwrites
/// the field's slot in the group's representative record.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Aggregate<F: FieldRef> {
    func: AggregateFunc,
    field: F,
}

impl<F: FieldRef> Aggregate<F> {
    #[must_use]
    pub const fn new(func: AggregateFunc, field: F) -> Self {
        Self { func, field }
    }

    #[must_use]
    pub const fn func(&self) -> AggregateFunc {
        self.func
    }

    #[must_use]
    pub const fn field(&self) -> F {
        self.field
    }

    /// Check that the field's kind supports this function.
    pub fn validate(&self) -> Result<(), ValidateError> {
        let kind = self.field.kind();
        if self.func.requires_numeric() && !kind.is_numeric() {
            return Err(ValidateError::InvalidFieldForAggregation {
                field: self.field.name(),
                func: self.func,
                kind,
            });
        }

        Ok(())
    }
}

// ------------------------------------------------------------------
// Factories
// ------------------------------------------------------------------

#[must_use]
pub const fn max<F: FieldRef>(field: F) -> Aggregate<F> {
    Aggregate::new(AggregateFunc::Max, field)
}

#[must_use]
pub const fn min<F: FieldRef>(field: F) -> Aggregate<F> {
    Aggregate::new(AggregateFunc::Min, field)
}

#[must_use]
pub const fn count<F: FieldRef>(field: F) -> Aggregate<F> {
    Aggregate::new(AggregateFunc::Count, field)
}

#[must_use]
pub const fn sum<F: FieldRef>(field: F) -> Aggregate<F> {
    Aggregate::new(AggregateFunc::Sum, field)
}

#[must_use]
pub const fn avg<F: FieldRef>(field: F) -> Aggregate<F> {
    Aggregate::new(AggregateFunc::Avg, field)
}
