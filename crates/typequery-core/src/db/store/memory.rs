use crate::{
    db::{
        executor::ExecutionConfig,
        query::{FluentQuery, Query},
        store::{RecordStore, SnapshotSource},
    },
    error::InternalError,
    traits::EntityKind,
    types::Id,
};
use std::collections::{BTreeMap, BTreeSet};

///
/// MemoryStore
///
/// Identity-keyed in-memory table for one entity type. Identities are
/// assigned from a monotonically increasing counter starting at 1 and are
/// never reused, even after `delete_all`.
///

#[derive(Clone, Debug)]
pub struct MemoryStore<E: EntityKind> {
    records: BTreeMap<Id, E>,
    next_id: Id,
    config: ExecutionConfig,
}

impl<E: EntityKind> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityKind> MemoryStore<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ExecutionConfig::default())
    }

    /// Store whose queries evaluate under `config`.
    #[must_use]
    pub const fn with_config(config: ExecutionConfig) -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    #[must_use]
    pub fn get(&self, id: Id) -> Option<&E> {
        self.records.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove every record. The identity counter keeps counting.
    pub fn delete_all(&mut self) {
        self.records.clear();
    }

    /// Start a query bound to this store.
    #[must_use]
    pub fn query(&self) -> FluentQuery<'_, E, Self> {
        FluentQuery::new(self, Query::new(), self.config)
    }

    fn bump_next_id(&mut self, seen: Id) -> Result<(), InternalError> {
        if seen >= self.next_id {
            self.next_id = seen.checked_add(1).ok_or_else(|| {
                InternalError::store_invariant(format!(
                    "identity space exhausted for '{}'",
                    E::ENTITY_NAME
                ))
            })?;
        }

        Ok(())
    }
}

impl<E: EntityKind> RecordStore<E> for MemoryStore<E> {
    fn create(&mut self, entity: E) -> Result<E, InternalError> {
        let id = self.next_id;
        self.bump_next_id(id)?;

        let record = entity.with_id(id);
        self.records.insert(id, record.clone());

        Ok(record)
    }

    fn save(&mut self, entity: E) -> Result<(), InternalError> {
        let id = entity.id();
        self.bump_next_id(id)?;
        self.records.insert(id, entity);

        Ok(())
    }

    fn delete(&mut self, id: Id) -> Option<E> {
        self.records.remove(&id)
    }
}

impl<E: EntityKind> SnapshotSource<E> for MemoryStore<E> {
    fn snapshot(&self) -> Vec<E> {
        self.records.values().cloned().collect()
    }

    fn snapshot_ids(&self, ids: &BTreeSet<Id>) -> Vec<E> {
        ids.iter()
            .filter_map(|id| self.records.get(id))
            .cloned()
            .collect()
    }
}
