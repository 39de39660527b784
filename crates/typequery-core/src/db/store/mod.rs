//! Record storage seams and the in-memory store.
//!
//! The evaluator never owns records; it asks a `SnapshotSource` for the
//! candidate set of one evaluation. `RecordStore` is the write side used
//! by hosts and tests to populate a source.

mod memory;

pub use memory::MemoryStore;

use crate::{error::InternalError, traits::EntityKind, types::Id};
use std::collections::BTreeSet;

///
/// SnapshotSource
///
/// Provides the records one evaluation runs against. Each call returns an
/// independent copy; consistency of that copy is the source's concern.
///

pub trait SnapshotSource<E: EntityKind> {
    /// Every record, in a stable order.
    fn snapshot(&self) -> Vec<E>;

    /// Records whose identity is in `ids`, in the same relative order as
    /// `snapshot`. Sources with keyed access should override this.
    fn snapshot_ids(&self, ids: &BTreeSet<Id>) -> Vec<E> {
        self.snapshot()
            .into_iter()
            .filter(|record| ids.contains(&record.id()))
            .collect()
    }
}

impl<E: EntityKind> SnapshotSource<E> for [E] {
    fn snapshot(&self) -> Vec<E> {
        self.to_vec()
    }
}

impl<E: EntityKind> SnapshotSource<E> for Vec<E> {
    fn snapshot(&self) -> Vec<E> {
        self.clone()
    }
}

impl<E, S> SnapshotSource<E> for &S
where
    E: EntityKind,
    S: SnapshotSource<E> + ?Sized,
{
    fn snapshot(&self) -> Vec<E> {
        (**self).snapshot()
    }

    fn snapshot_ids(&self, ids: &BTreeSet<Id>) -> Vec<E> {
        (**self).snapshot_ids(ids)
    }
}

///
/// RecordStore
///
/// Create/save/delete primitives over one entity type.
///

pub trait RecordStore<E: EntityKind> {
    /// Insert `entity` under a freshly assigned identity and return the
    /// stored record.
    fn create(&mut self, entity: E) -> Result<E, InternalError>;

    /// Insert or replace the record with `entity`'s identity.
    fn save(&mut self, entity: E) -> Result<(), InternalError>;

    /// Remove the record with `id`, returning it if present.
    fn delete(&mut self, id: Id) -> Option<E>;
}
