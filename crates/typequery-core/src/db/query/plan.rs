use crate::{
    db::{predicate::Predicate, query::aggregate::Aggregate},
    traits::{EntityKind, FieldRef},
    types::Id,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, sync::Arc};

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

///
/// OrderTarget
/// What one ordering key compares: the record identity or one field.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OrderTarget<F: FieldRef> {
    Id,
    Field(F),
}

///
/// OrderKey
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct OrderKey<F: FieldRef> {
    pub target: OrderTarget<F>,
    pub direction: OrderDirection,
}

impl<F: FieldRef> OrderKey<F> {
    #[must_use]
    pub const fn new(target: OrderTarget<F>, direction: OrderDirection) -> Self {
        Self { target, direction }
    }

    /// Key synthesized when an ordered evaluation has no explicit keys.
    #[must_use]
    pub const fn id_asc() -> Self {
        Self::new(OrderTarget::Id, OrderDirection::Asc)
    }
}

///
/// PageSpec
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageSpec {
    pub offset: u32,
    pub limit: Option<u32>,
}

///
/// QueryPlan
///
/// Immutable description of one query: everything an evaluator needs
/// besides the record snapshot. Sub-structures are shared through `Arc`,
/// so extending a plan copies only the part being extended and plans can
/// be handed to any number of threads.
///
/// Produced by `Query::plan`, which guarantees that `group_by` and
/// `aggregate` are either both present or both absent.
///

#[derive(Clone, Debug)]
pub struct QueryPlan<E: EntityKind> {
    pub(crate) predicates: Arc<Vec<Predicate<E::Field>>>,
    pub(crate) id_filter: Option<Arc<BTreeSet<Id>>>,
    pub(crate) order: Arc<Vec<OrderKey<E::Field>>>,
    pub(crate) projection: Option<Arc<Vec<E::Field>>>,
    pub(crate) group_by: Option<Arc<Vec<E::Field>>>,
    pub(crate) aggregate: Option<Aggregate<E::Field>>,
    pub(crate) page: PageSpec,
}

impl<E: EntityKind> Default for QueryPlan<E> {
    fn default() -> Self {
        Self {
            predicates: Arc::default(),
            id_filter: None,
            order: Arc::default(),
            projection: None,
            group_by: None,
            aggregate: None,
            page: PageSpec::default(),
        }
    }
}

impl<E: EntityKind> QueryPlan<E> {
    /// Conjunction of field predicates.
    #[must_use]
    pub fn predicates(&self) -> &[Predicate<E::Field>] {
        &self.predicates
    }

    /// Identity pre-filter; `Some(empty)` matches nothing.
    #[must_use]
    pub fn id_filter(&self) -> Option<&BTreeSet<Id>> {
        self.id_filter.as_deref()
    }

    /// Explicit ordering keys, without the synthesized identity default.
    #[must_use]
    pub fn order(&self) -> &[OrderKey<E::Field>] {
        &self.order
    }

    #[must_use]
    pub fn projection(&self) -> Option<&[E::Field]> {
        self.projection.as_deref().map(Vec::as_slice)
    }

    #[must_use]
    pub fn group_by(&self) -> Option<&[E::Field]> {
        self.group_by.as_deref().map(Vec::as_slice)
    }

    #[must_use]
    pub const fn aggregate(&self) -> Option<&Aggregate<E::Field>> {
        self.aggregate.as_ref()
    }

    #[must_use]
    pub const fn page(&self) -> PageSpec {
        self.page
    }

    /// Ordering keys an ordered evaluation applies: the explicit keys, or
    /// `id asc` when none were given.
    #[must_use]
    pub fn effective_order(&self) -> Vec<OrderKey<E::Field>> {
        if self.order.is_empty() {
            vec![OrderKey::id_asc()]
        } else {
            self.order.to_vec()
        }
    }

    /// Whether a field survives projection.
    ///
    /// With no projection every field survives; with a projection the
    /// aggregate field also survives so the aggregate stays readable.
    #[must_use]
    pub fn is_projected(&self, field: E::Field) -> bool {
        match &self.projection {
            None => true,
            Some(fields) => {
                fields.contains(&field) || self.aggregate.is_some_and(|agg| agg.field() == field)
            }
        }
    }
}
