use crate::{traits::EntityKind, types::Id};
use derive_more::{Deref, IntoIterator};
use std::collections::{BTreeMap, btree_map};

///
/// RecordSet
///
/// Result of an unordered find: records deduplicated by identity.
/// Iteration order carries no meaning.
///

#[derive(Clone, Debug)]
pub struct RecordSet<E: EntityKind>(BTreeMap<Id, E>);

impl<E: EntityKind> RecordSet<E> {
    pub(crate) fn from_records(records: Vec<E>) -> Self {
        Self(records.into_iter().map(|r| (r.id(), r)).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains_id(&self, id: Id) -> bool {
        self.0.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: Id) -> Option<&E> {
        self.0.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.0.values()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<E> {
        self.0.into_values().collect()
    }
}

impl<E: EntityKind + PartialEq> RecordSet<E> {
    /// Whether a record equal to `entity` (same identity, same slots) is present.
    #[must_use]
    pub fn contains(&self, entity: &E) -> bool {
        self.0.get(&entity.id()).is_some_and(|found| found == entity)
    }
}

impl<E: EntityKind> IntoIterator for RecordSet<E> {
    type Item = E;
    type IntoIter = btree_map::IntoValues<Id, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}

///
/// RecordList
///
/// Result of an ordered find. Derefs to the ordered slice.
///

#[derive(Clone, Debug, Deref, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct RecordList<E: EntityKind>(Vec<E>);

impl<E: EntityKind> RecordList<E> {
    pub(crate) const fn from_records(records: Vec<E>) -> Self {
        Self(records)
    }

    #[must_use]
    pub fn ids(&self) -> Vec<Id> {
        self.0.iter().map(EntityKind::id).collect()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<E> {
        self.0
    }
}

impl<E: EntityKind + PartialEq> RecordList<E> {
    /// Position of the record equal to `entity`, if present.
    #[must_use]
    pub fn index_of(&self, entity: &E) -> Option<usize> {
        self.0.iter().position(|found| found == entity)
    }
}
