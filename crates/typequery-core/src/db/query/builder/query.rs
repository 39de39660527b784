use crate::{
    db::{
        executor::Evaluator,
        predicate::{Matcher, Predicate, ValidateError},
        query::{
            aggregate::Aggregate,
            builder::matcher::eq,
            plan::{OrderDirection, OrderKey, OrderTarget, PageSpec, QueryPlan},
        },
        response::{RecordList, RecordSet},
    },
    error::InternalError,
    traits::EntityKind,
    types::Id,
    value::Value,
};
use std::{collections::BTreeSet, sync::Arc};
use thiserror::Error as ThisError;

///
/// Query
///
/// Typed, value-semantics plan builder.
///
/// Every method borrows the receiver and returns a new, extended query;
/// the receiver is never modified, so a partially built query can be
/// reused as the base of several others. Unchanged parts of the plan are
/// shared between the two values.
///
/// Field-level validation happens here, when a matcher or aggregate is
/// bound. Cross-field consistency (group-by vs aggregate) is checked by
/// `plan`, which every terminal goes through.
///

#[derive(Clone, Debug)]
pub struct Query<E: EntityKind> {
    plan: QueryPlan<E>,
}

impl<E: EntityKind> Default for Query<E> {
    fn default() -> Self {
        Self::new()
    }
}

///
/// QueryError
///
/// `Validate` is caller-recoverable misuse; `Execute` is an unexpected
/// engine or entity-mapping failure.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error("{0}")]
    Validate(#[from] ValidateError),
    #[error("{0}")]
    Execute(#[from] InternalError),
}

impl QueryError {
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validate(_))
    }
}

impl<E: EntityKind> Query<E> {
    /// Create an empty query. An empty query matches every record.
    #[must_use]
    pub fn new() -> Self {
        Self {
            plan: QueryPlan::default(),
        }
    }

    fn extend(&self, f: impl FnOnce(&mut QueryPlan<E>)) -> Self {
        let mut plan = self.plan.clone();
        f(&mut plan);

        Self { plan }
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    /// Bind `matcher` to `field` and AND it with existing predicates.
    pub fn filter(&self, field: E::Field, matcher: Matcher) -> Result<Self, QueryError> {
        let predicate = Predicate::new(field, matcher)?;

        Ok(self.extend(|plan| Arc::make_mut(&mut plan.predicates).push(predicate)))
    }

    /// Equality shortcut: `filter_eq(f, v)` is `filter(f, eq(v))`.
    pub fn filter_eq(&self, field: E::Field, value: impl Into<Value>) -> Result<Self, QueryError> {
        self.filter(field, eq(value))
    }

    /// Restrict to a single identity.
    #[must_use]
    pub fn by_id(&self, id: Id) -> Self {
        self.by_ids([id])
    }

    /// Restrict to a set of identities. Repeated calls intersect.
    #[must_use]
    pub fn by_ids<I>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = Id>,
    {
        let ids: BTreeSet<Id> = ids.into_iter().collect();

        self.extend(|plan| {
            let next = match plan.id_filter.as_deref() {
                Some(existing) => existing.intersection(&ids).copied().collect(),
                None => ids,
            };
            plan.id_filter = Some(Arc::new(next));
        })
    }

    // ------------------------------------------------------------------
    // Ordering
    // ------------------------------------------------------------------

    /// Append an ascending identity key.
    #[must_use]
    pub fn order(&self) -> Self {
        self.order_dir(OrderDirection::Asc)
    }

    /// Append an identity key with an explicit direction.
    #[must_use]
    pub fn order_dir(&self, direction: OrderDirection) -> Self {
        self.push_order(OrderKey::new(OrderTarget::Id, direction))
    }

    /// Append an ascending field key.
    #[must_use]
    pub fn order_by(&self, field: E::Field) -> Self {
        self.order_by_dir(field, OrderDirection::Asc)
    }

    /// Append a field key with an explicit direction.
    #[must_use]
    pub fn order_by_dir(&self, field: E::Field, direction: OrderDirection) -> Self {
        self.push_order(OrderKey::new(OrderTarget::Field(field), direction))
    }

    // A repeated target can never break a tie the earlier key left, so it is dropped.
    fn push_order(&self, key: OrderKey<E::Field>) -> Self {
        if self.plan.order.iter().any(|k| k.target == key.target) {
            return self.clone();
        }

        self.extend(|plan| Arc::make_mut(&mut plan.order).push(key))
    }

    // ------------------------------------------------------------------
    // Projection, grouping, aggregation
    // ------------------------------------------------------------------

    /// Set or extend the projection.
    #[must_use]
    pub fn select<I>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = E::Field>,
    {
        let fields: Vec<_> = fields.into_iter().collect();

        self.extend(|plan| {
            let projection = plan.projection.get_or_insert_with(Arc::default);
            push_unique(Arc::make_mut(projection), fields);
        })
    }

    /// Set the aggregate, replacing any previous one.
    pub fn select_agg(&self, aggregate: Aggregate<E::Field>) -> Result<Self, QueryError> {
        aggregate.validate()?;

        Ok(self.extend(|plan| plan.aggregate = Some(aggregate)))
    }

    /// Set or extend the group-by fields.
    #[must_use]
    pub fn group_by<I>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = E::Field>,
    {
        let fields: Vec<_> = fields.into_iter().collect();

        self.extend(|plan| {
            let group_by = plan.group_by.get_or_insert_with(Arc::default);
            push_unique(Arc::make_mut(group_by), fields);
        })
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    /// Take at most `count` records, keeping any offset.
    #[must_use]
    pub fn limit(&self, count: u32) -> Self {
        self.extend(|plan| plan.page.limit = Some(count))
    }

    /// Skip `offset` records, then take at most `count`.
    #[must_use]
    pub fn limit_offset(&self, offset: u32, count: u32) -> Self {
        self.extend(|plan| {
            plan.page = PageSpec {
                offset,
                limit: Some(count),
            };
        })
    }

    // ------------------------------------------------------------------
    // Finalization and terminals
    // ------------------------------------------------------------------

    /// Finalize into an immutable plan, checking cross-field consistency.
    pub fn plan(&self) -> Result<QueryPlan<E>, QueryError> {
        let group_by = self.plan.group_by.as_ref().is_some_and(|g| !g.is_empty());
        let aggregate = self.plan.aggregate.is_some();

        if group_by != aggregate {
            return Err(ValidateError::InconsistentGroupAggregateState {
                group_by,
                aggregate,
            }
            .into());
        }

        // empty field sets mean "not requested"
        let mut plan = self.plan.clone();
        if plan.group_by.as_ref().is_some_and(|g| g.is_empty()) {
            plan.group_by = None;
        }
        if plan.projection.as_ref().is_some_and(|p| p.is_empty()) {
            plan.projection = None;
        }

        Ok(plan)
    }

    /// Unordered, identity-deduplicated evaluation.
    pub fn find<V>(&self, evaluator: &V) -> Result<RecordSet<E>, QueryError>
    where
        V: Evaluator<E> + ?Sized,
    {
        evaluator.find(&self.plan()?)
    }

    /// Ordered evaluation.
    pub fn find_with_order<V>(&self, evaluator: &V) -> Result<RecordList<E>, QueryError>
    where
        V: Evaluator<E> + ?Sized,
    {
        evaluator.find_with_order(&self.plan()?)
    }
}

// Append fields not already present, preserving first-seen order.
fn push_unique<F: PartialEq>(target: &mut Vec<F>, fields: Vec<F>) {
    for field in fields {
        if !target.contains(&field) {
            target.push(field);
        }
    }
}
