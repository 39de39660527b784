//! Module: query::fluent::load
//! Responsibility: fluent read-query builder bound to one snapshot source.
//! Does not own: bind-time validation or row-level evaluation.
//! Boundary: every builder call delegates to `Query`; terminals run `MemoryEvaluator`.

use crate::{
    db::{
        executor::{ExecutionConfig, MemoryEvaluator},
        predicate::Matcher,
        query::{
            aggregate::Aggregate,
            builder::{Query, QueryError},
            plan::{OrderDirection, QueryPlan},
        },
        response::{RecordList, RecordSet},
        store::SnapshotSource,
    },
    traits::EntityKind,
    types::Id,
    value::Value,
};

///
/// FluentQuery
///
/// Source-bound query wrapper.
/// Owns query construction and execution routing only; the source is
/// snapshotted when a terminal runs, not when the query is built.
///

pub struct FluentQuery<'a, E, S>
where
    E: EntityKind,
    S: SnapshotSource<E> + ?Sized,
{
    source: &'a S,
    query: Query<E>,
    config: ExecutionConfig,
}

impl<'a, E, S> FluentQuery<'a, E, S>
where
    E: EntityKind,
    S: SnapshotSource<E> + ?Sized,
{
    pub(crate) const fn new(source: &'a S, query: Query<E>, config: ExecutionConfig) -> Self {
        Self {
            source,
            query,
            config,
        }
    }

    // ------------------------------------------------------------------
    // Query inspection
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn query(&self) -> &Query<E> {
        &self.query
    }

    fn map_query(mut self, map: impl FnOnce(&Query<E>) -> Query<E>) -> Self {
        self.query = map(&self.query);
        self
    }

    fn try_map_query(
        mut self,
        map: impl FnOnce(&Query<E>) -> Result<Query<E>, QueryError>,
    ) -> Result<Self, QueryError> {
        self.query = map(&self.query)?;
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Query refinement
    // ------------------------------------------------------------------

    pub fn filter(self, field: E::Field, matcher: Matcher) -> Result<Self, QueryError> {
        self.try_map_query(|query| query.filter(field, matcher))
    }

    pub fn filter_eq(self, field: E::Field, value: impl Into<Value>) -> Result<Self, QueryError> {
        self.try_map_query(|query| query.filter_eq(field, value))
    }

    #[must_use]
    pub fn by_id(self, id: Id) -> Self {
        self.map_query(|query| query.by_id(id))
    }

    #[must_use]
    pub fn by_ids<I>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = Id>,
    {
        self.map_query(|query| query.by_ids(ids))
    }

    #[must_use]
    pub fn order(self) -> Self {
        self.map_query(Query::order)
    }

    #[must_use]
    pub fn order_dir(self, direction: OrderDirection) -> Self {
        self.map_query(|query| query.order_dir(direction))
    }

    #[must_use]
    pub fn order_by(self, field: E::Field) -> Self {
        self.map_query(|query| query.order_by(field))
    }

    #[must_use]
    pub fn order_by_dir(self, field: E::Field, direction: OrderDirection) -> Self {
        self.map_query(|query| query.order_by_dir(field, direction))
    }

    #[must_use]
    pub fn select<I>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = E::Field>,
    {
        self.map_query(|query| query.select(fields))
    }

    pub fn select_agg(self, aggregate: Aggregate<E::Field>) -> Result<Self, QueryError> {
        self.try_map_query(|query| query.select_agg(aggregate))
    }

    #[must_use]
    pub fn group_by<I>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = E::Field>,
    {
        self.map_query(|query| query.group_by(fields))
    }

    #[must_use]
    pub fn limit(self, count: u32) -> Self {
        self.map_query(|query| query.limit(count))
    }

    #[must_use]
    pub fn limit_offset(self, offset: u32, count: u32) -> Self {
        self.map_query(|query| query.limit_offset(offset, count))
    }

    // ------------------------------------------------------------------
    // Planning
    // ------------------------------------------------------------------

    pub fn plan(&self) -> Result<QueryPlan<E>, QueryError> {
        self.query.plan()
    }

    // ------------------------------------------------------------------
    // Execution terminals
    // ------------------------------------------------------------------

    /// Unordered, identity-deduplicated evaluation against the bound source.
    pub fn find(&self) -> Result<RecordSet<E>, QueryError> {
        self.query.find(&self.evaluator())
    }

    /// Ordered evaluation against the bound source.
    pub fn find_with_order(&self) -> Result<RecordList<E>, QueryError> {
        self.query.find_with_order(&self.evaluator())
    }

    const fn evaluator(&self) -> MemoryEvaluator<&'a S> {
        MemoryEvaluator::with_config(self.source, self.config)
    }
}
