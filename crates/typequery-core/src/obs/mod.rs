//! Observability: evaluation telemetry (metrics) and sink abstractions.
//!
//! Diagnostic logging goes through `tracing`; counters go through the
//! sink boundary below. Neither installs a subscriber or exporter.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, EntitySummary, EventOps, EventPerf, EventReport, EventState};
pub use sink::{
    ExecKind, MetricsEvent, MetricsSink, PlanKind, metrics_report, metrics_reset_all,
    with_metrics_sink,
};
