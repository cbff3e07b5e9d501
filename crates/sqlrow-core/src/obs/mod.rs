//! Observability: runtime counters and the sink boundary they flow through.
//!
//! Execution code records `MetricsEvent`s through `sink::record` only and
//! never touches `metrics` state directly.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{AccessorSummary, EventOps, EventPerf, EventReport, EventState};
pub use sink::{
    MetricsEvent, MetricsSink, SortKind, metrics_report, metrics_reset_all, with_metrics_sink,
};
