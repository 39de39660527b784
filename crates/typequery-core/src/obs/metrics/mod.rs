use serde::{Deserialize, Serialize};
use std::{cell::RefCell, cmp::Ordering, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters and simple perf totals for evaluations.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub perf: EventPerf,
    pub entities: BTreeMap<String, EntityCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Terminal entrypoints
    pub find_calls: u64,
    pub find_ordered_calls: u64,

    // Plan shapes
    pub plan_ids: u64,
    pub plan_full_scan: u64,

    // Rows through the pipeline
    pub rows_scanned: u64,
    pub rows_matched: u64,
    pub rows_returned: u64,
    pub groups_formed: u64,
}

///
/// EntityCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EntityCounters {
    pub find_calls: u64,
    pub rows_scanned: u64,
    pub rows_matched: u64,
    pub rows_returned: u64,
    pub groups_formed: u64,
}

///
/// EventPerf
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventPerf {
    pub find_micros_total: u128,
    pub find_micros_max: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters and perf totals.
pub fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

/// Accumulate a duration sample and track the max.
pub(crate) fn add_micros(total: &mut u128, max: &mut u64, delta: u64) {
    *total = total.saturating_add(u128::from(delta));
    if delta > *max {
        *max = delta;
    }
}

///
/// EventReport
/// Point-in-time snapshot of the counters plus a per-entity summary.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    pub counters: EventState,
    pub entity_summaries: Vec<EntitySummary>,
}

///
/// EntitySummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EntitySummary {
    pub entity: String,
    pub find_calls: u64,
    pub rows_scanned: u64,
    pub rows_returned: u64,
    pub avg_rows_scanned_per_find: f64,
    pub selectivity: f64,
}

#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn report() -> EventReport {
    let counters = with_state(Clone::clone);

    let mut entity_summaries: Vec<_> = counters
        .entities
        .iter()
        .map(|(entity, c)| {
            let avg_scanned = if c.find_calls == 0 {
                0.0
            } else {
                c.rows_scanned as f64 / c.find_calls as f64
            };
            let selectivity = if c.rows_scanned == 0 {
                0.0
            } else {
                c.rows_matched as f64 / c.rows_scanned as f64
            };

            EntitySummary {
                entity: entity.clone(),
                find_calls: c.find_calls,
                rows_scanned: c.rows_scanned,
                rows_returned: c.rows_returned,
                avg_rows_scanned_per_find: avg_scanned,
                selectivity,
            }
        })
        .collect();

    // heaviest scanners first, then by name
    entity_summaries.sort_by(|a, b| {
        b.avg_rows_scanned_per_find
            .partial_cmp(&a.avg_rows_scanned_per_find)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.entity.cmp(&b.entity))
    });

    EventReport {
        counters,
        entity_summaries,
    }
}

///
/// TESTS
///
