use crate::{
    error::InternalError,
    model::field::{FieldKind, FieldModel},
    types::Id,
    value::Value,
};
use std::{fmt::Debug, hash::Hash};

///
/// FieldRef
///
/// Closed, compile-time-enumerable reference to one slot of an entity.
/// Each entity declares its own field enum, so a reference can never be
/// used against a different entity type.
///

pub trait FieldRef: Copy + Debug + Eq + Hash + Send + Sync + 'static {
    /// Static descriptor for this slot.
    fn model(self) -> &'static FieldModel;

    fn name(self) -> &'static str {
        self.model().name
    }

    fn kind(self) -> FieldKind {
        self.model().kind
    }

    fn nullable(self) -> bool {
        self.model().nullable
    }
}

///
/// EntityKind
///
/// Runtime interface the engine needs from one entity type: identity,
/// the field enum, and a `(record, field) → value` mapping in both
/// directions.
///

pub trait EntityKind: Clone + Debug + Send + Sync + 'static {
    type Field: FieldRef;

    /// Stable external name used in diagnostics and metrics.
    const ENTITY_NAME: &'static str;

    /// Every field of the entity, in declaration order.
    const FIELDS: &'static [Self::Field];

    /// Store-assigned identity.
    fn id(&self) -> Id;

    /// Return this record with its identity replaced.
    ///
    /// Only persistence collaborators assign identities.
    #[must_use]
    fn with_id(self, id: Id) -> Self;

    /// Read one slot.
    fn get_value(&self, field: Self::Field) -> Value;

    /// Overwrite one slot.
    ///
    /// Implementations must accept `Value::Null` for every non-text slot
    /// and `Value::Text("")` for every text slot; projection relies on it.
    fn set_value(&mut self, field: Self::Field, value: Value) -> Result<(), InternalError>;
}
