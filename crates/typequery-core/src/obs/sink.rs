//! Metrics sink boundary.
//!
//! Evaluation logic MUST NOT touch obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only bridge between execution and the
//! thread-local metrics state.
use crate::{obs::metrics, traits::EntityKind};
use std::{cell::RefCell, marker::PhantomData, rc::Rc, time::Instant};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// ExecKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecKind {
    Find,
    FindOrdered,
}

///
/// PlanKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlanKind {
    Ids,
    FullScan,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    ExecStart {
        kind: ExecKind,
        entity: &'static str,
    },
    ExecFinish {
        kind: ExecKind,
        entity: &'static str,
        rows_returned: u64,
        micros: u64,
    },
    RowsScanned {
        entity: &'static str,
        rows_scanned: u64,
    },
    RowsMatched {
        entity: &'static str,
        rows_matched: u64,
    },
    GroupsFormed {
        entity: &'static str,
        groups: u64,
    },
    Plan {
        kind: PlanKind,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

///
/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.
///

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::ExecStart { kind, entity } => {
                metrics::with_state_mut(|m| {
                    match kind {
                        ExecKind::Find => m.ops.find_calls = m.ops.find_calls.saturating_add(1),
                        ExecKind::FindOrdered => {
                            m.ops.find_ordered_calls = m.ops.find_ordered_calls.saturating_add(1);
                        }
                    }

                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.find_calls = entry.find_calls.saturating_add(1);
                });
            }

            MetricsEvent::ExecFinish {
                entity,
                rows_returned,
                micros,
                ..
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_returned = m.ops.rows_returned.saturating_add(rows_returned);
                    metrics::add_micros(
                        &mut m.perf.find_micros_total,
                        &mut m.perf.find_micros_max,
                        micros,
                    );

                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.rows_returned = entry.rows_returned.saturating_add(rows_returned);
                });
            }

            MetricsEvent::RowsScanned {
                entity,
                rows_scanned,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_scanned = m.ops.rows_scanned.saturating_add(rows_scanned);
                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.rows_scanned = entry.rows_scanned.saturating_add(rows_scanned);
                });
            }

            MetricsEvent::RowsMatched {
                entity,
                rows_matched,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_matched = m.ops.rows_matched.saturating_add(rows_matched);
                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.rows_matched = entry.rows_matched.saturating_add(rows_matched);
                });
            }

            MetricsEvent::GroupsFormed { entity, groups } => {
                metrics::with_state_mut(|m| {
                    m.ops.groups_formed = m.ops.groups_formed.saturating_add(groups);
                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.groups_formed = entry.groups_formed.saturating_add(groups);
                });
            }

            MetricsEvent::Plan { kind } => {
                metrics::with_state_mut(|m| match kind {
                    PlanKind::Ids => m.ops.plan_ids = m.ops.plan_ids.saturating_add(1),
                    PlanKind::FullScan => {
                        m.ops.plan_full_scan = m.ops.plan_full_scan.saturating_add(1);
                    }
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match override_sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state for endpoint/test plumbing.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state (counters + perf).
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override on this thread.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

/// Span
/// RAII guard that emits start/finish metrics events for one evaluation.
/// Ensures finish accounting happens even on early return.

pub(crate) struct Span<E: EntityKind> {
    kind: ExecKind,
    start: Instant,
    rows: u64,
    _marker: PhantomData<E>,
}

impl<E: EntityKind> Span<E> {
    #[must_use]
    /// Start a metrics span for an entity and terminal kind.
    pub(crate) fn new(kind: ExecKind) -> Self {
        record(MetricsEvent::ExecStart {
            kind,
            entity: E::ENTITY_NAME,
        });

        Self {
            kind,
            start: Instant::now(),
            rows: 0,
            _marker: PhantomData,
        }
    }

    pub(crate) const fn set_rows(&mut self, rows: u64) {
        self.rows = rows;
    }
}

impl<E: EntityKind> Drop for Span<E> {
    fn drop(&mut self) {
        let micros = u64::try_from(self.start.elapsed().as_micros()).unwrap_or(u64::MAX);

        record(MetricsEvent::ExecFinish {
            kind: self.kind,
            entity: E::ENTITY_NAME,
            rows_returned: self.rows,
            micros,
        });
    }
}
