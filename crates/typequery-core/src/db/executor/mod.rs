//! Module: db::executor
//! Responsibility: run an immutable query plan against a record snapshot.
//! Does not own: plan construction or bind-time validation.
//! Boundary: `Evaluator` is the capability seam; `MemoryEvaluator` is the in-memory implementation.

mod config;
mod group;
mod order;

pub use config::ExecutionConfig;

// Design notes:
// - Stage order is fixed: identity pre-filter, predicate filter, group, sort, page, project.
// - Filtering and grouping preserve snapshot order; sorting is stable on top of that.
// - Unordered evaluation skips the sort stage entirely, pagination still applies.
// - Projection runs last so ordering and grouping always see the full record.

use crate::{
    db::{
        predicate::eval_all,
        query::{PageSpec, QueryError, QueryPlan},
        response::{RecordList, RecordSet},
        store::SnapshotSource,
    },
    error::InternalError,
    obs::sink::{self, ExecKind, MetricsEvent, PlanKind, Span},
    traits::{EntityKind, FieldRef},
    value::Value,
};

///
/// Evaluator
///
/// Capability to evaluate a finalized plan. The in-memory implementation
/// walks a snapshot; other implementations may lower the plan to a remote
/// query language, provided they return the same records.
///

pub trait Evaluator<E: EntityKind> {
    /// Unordered, identity-deduplicated evaluation.
    fn find(&self, plan: &QueryPlan<E>) -> Result<RecordSet<E>, QueryError>;

    /// Ordered evaluation; `id asc` applies when the plan has no keys.
    fn find_with_order(&self, plan: &QueryPlan<E>) -> Result<RecordList<E>, QueryError>;
}

///
/// MemoryEvaluator
///
/// Evaluates plans against whatever `source` snapshots at call time.
///

#[derive(Clone, Debug)]
pub struct MemoryEvaluator<S> {
    source: S,
    config: ExecutionConfig,
}

impl<S> MemoryEvaluator<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_config(source, ExecutionConfig::default())
    }

    #[must_use]
    pub const fn with_config(source: S, config: ExecutionConfig) -> Self {
        Self { source, config }
    }

    #[must_use]
    pub const fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    fn execute<E>(&self, plan: &QueryPlan<E>, kind: ExecKind) -> Result<Vec<E>, InternalError>
    where
        E: EntityKind,
        S: SnapshotSource<E>,
    {
        let mut span = Span::<E>::new(kind);
        let entity = E::ENTITY_NAME;

        // identity pre-filter
        let candidates = match plan.id_filter() {
            Some(ids) if ids.is_empty() => {
                tracing::debug!("[{entity}] empty identity filter, nothing to evaluate");
                return Ok(Vec::new());
            }
            Some(ids) => {
                sink::record(MetricsEvent::Plan { kind: PlanKind::Ids });
                self.source.snapshot_ids(ids)
            }
            None => {
                sink::record(MetricsEvent::Plan {
                    kind: PlanKind::FullScan,
                });
                self.source.snapshot()
            }
        };
        let scanned = candidates.len();
        sink::record(MetricsEvent::RowsScanned {
            entity,
            rows_scanned: as_count(scanned),
        });

        // predicate filter
        let mut rows: Vec<E> = candidates
            .into_iter()
            .filter(|record| eval_all(record, plan.predicates()))
            .collect();
        sink::record(MetricsEvent::RowsMatched {
            entity,
            rows_matched: as_count(rows.len()),
        });
        tracing::debug!(
            "[{entity}] {} of {scanned} candidate records matched {} predicates",
            rows.len(),
            plan.predicates().len()
        );

        // group + aggregate
        match (plan.group_by(), plan.aggregate()) {
            (Some(group_by), Some(aggregate)) => {
                rows = group::group_and_aggregate(rows, group_by, *aggregate, &self.config)?;
                sink::record(MetricsEvent::GroupsFormed {
                    entity,
                    groups: as_count(rows.len()),
                });
                tracing::debug!(
                    "[{entity}] formed {} groups for {}({})",
                    rows.len(),
                    aggregate.func(),
                    aggregate.field().name()
                );
            }
            (None, None) => {}
            (group_by, aggregate) => {
                return Err(InternalError::query_invariant(format!(
                    "plan for '{entity}' reached evaluation with group_by={} and aggregate={}",
                    group_by.is_some(),
                    aggregate.is_some()
                )));
            }
        }

        // sort
        if kind == ExecKind::FindOrdered {
            let keys = plan.effective_order();
            order::sort_rows(&mut rows, &keys);
            tracing::trace!("[{entity}] sorted {} rows by {} keys", rows.len(), keys.len());
        }

        // page
        let mut rows = paginate(rows, plan.page());

        // project
        if plan.projection().is_some() {
            for record in &mut rows {
                project(record, plan)?;
            }
        }

        span.set_rows(as_count(rows.len()));

        Ok(rows)
    }
}

impl<E, S> Evaluator<E> for MemoryEvaluator<S>
where
    E: EntityKind,
    S: SnapshotSource<E>,
{
    fn find(&self, plan: &QueryPlan<E>) -> Result<RecordSet<E>, QueryError> {
        let rows = self.execute(plan, ExecKind::Find)?;

        Ok(RecordSet::from_records(rows))
    }

    fn find_with_order(&self, plan: &QueryPlan<E>) -> Result<RecordList<E>, QueryError> {
        let rows = self.execute(plan, ExecKind::FindOrdered)?;

        Ok(RecordList::from_records(rows))
    }
}

fn paginate<E>(rows: Vec<E>, page: PageSpec) -> Vec<E> {
    let skipped = rows.into_iter().skip(page.offset as usize);

    match page.limit {
        Some(limit) => skipped.take(limit as usize).collect(),
        None => skipped.collect(),
    }
}

// Clear every slot outside the projection; identity is not a slot.
fn project<E: EntityKind>(record: &mut E, plan: &QueryPlan<E>) -> Result<(), InternalError> {
    for field in E::FIELDS {
        if !plan.is_projected(*field) {
            record.set_value(*field, Value::cleared(field.kind()))?;
        }
    }

    Ok(())
}

fn as_count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}
