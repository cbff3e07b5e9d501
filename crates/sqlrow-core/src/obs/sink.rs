//! Metrics sink boundary.
//!
//! Row, binding, and sort code MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::obs::metrics;
use sqlrow_primitives::TypeCode;
use std::{cell::RefCell, rc::Rc, time::Instant};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// SortKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortKind {
    Full,
    Bounded,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    SortStart {
        kind: SortKind,
        rows: u64,
    },
    SortFinish {
        kind: SortKind,
        rows: u64,
        comparisons: u64,
        failed: bool,
        micros: u64,
    },
    BucketBuild {
        extents: u64,
        properties: u64,
    },
    PlanClone {
        properties: u64,
    },
    RandomKeyAssigned,
    AccessorMismatch {
        requested: TypeCode,
        actual: TypeCode,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that folds events into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::SortStart { kind, rows: _ } => {
                metrics::with_state_mut(|m| match kind {
                    SortKind::Full => m.ops.sort_calls = m.ops.sort_calls.saturating_add(1),
                    SortKind::Bounded => {
                        m.ops.bounded_sort_calls = m.ops.bounded_sort_calls.saturating_add(1);
                    }
                });
            }

            MetricsEvent::SortFinish {
                kind: _,
                rows,
                comparisons,
                failed,
                micros,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_sorted = m.ops.rows_sorted.saturating_add(rows);
                    m.ops.comparisons = m.ops.comparisons.saturating_add(comparisons);
                    if failed {
                        m.ops.comparison_failures = m.ops.comparison_failures.saturating_add(1);
                    }
                    metrics::add_micros(
                        &mut m.perf.sort_micros_total,
                        &mut m.perf.sort_micros_max,
                        micros,
                    );
                });
            }

            MetricsEvent::BucketBuild {
                extents: _,
                properties,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.bucket_builds = m.ops.bucket_builds.saturating_add(1);
                    m.ops.bucketed_properties =
                        m.ops.bucketed_properties.saturating_add(properties);
                });
            }

            MetricsEvent::PlanClone { properties } => {
                metrics::with_state_mut(|m| {
                    m.ops.plan_clones = m.ops.plan_clones.saturating_add(1);
                    m.ops.cloned_properties = m.ops.cloned_properties.saturating_add(properties);
                });
            }

            MetricsEvent::RandomKeyAssigned => {
                metrics::with_state_mut(|m| {
                    m.ops.random_keys_assigned = m.ops.random_keys_assigned.saturating_add(1);
                });
            }

            MetricsEvent::AccessorMismatch {
                requested,
                actual: _,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.accessor_type_mismatches =
                        m.ops.accessor_type_mismatches.saturating_add(1);
                    let entry = m
                        .accessor_mismatches
                        .entry(requested.label().to_string())
                        .or_default();
                    *entry = entry.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
///
/// `window_start_ms` filters by window start (`EventState::since_ms`),
/// not by per-event timestamps.
#[must_use]
pub fn metrics_report(window_start_ms: Option<u64>) -> metrics::EventReport {
    metrics::report_window_start(window_start_ms)
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

///
/// SortSpan
/// RAII guard that emits start/finish events for one sort pass.
/// Finish accounting happens on every exit path, including early error
/// returns.
///

pub(crate) struct SortSpan {
    kind: SortKind,
    start: Instant,
    rows: u64,
    comparisons: u64,
    failed: bool,
}

impl SortSpan {
    #[must_use]
    pub(crate) fn new(kind: SortKind, rows: usize) -> Self {
        let rows = u64::try_from(rows).unwrap_or(u64::MAX);
        record(MetricsEvent::SortStart { kind, rows });

        Self {
            kind,
            start: Instant::now(),
            rows,
            comparisons: 0,
            failed: false,
        }
    }

    pub(crate) const fn set_comparisons(&mut self, comparisons: u64) {
        self.comparisons = comparisons;
    }

    pub(crate) const fn mark_failed(&mut self) {
        self.failed = true;
    }

    fn finish_inner(&self) {
        let micros = u64::try_from(self.start.elapsed().as_micros()).unwrap_or(u64::MAX);

        record(MetricsEvent::SortFinish {
            kind: self.kind,
            rows: self.rows,
            comparisons: self.comparisons,
            failed: self.failed,
            micros,
        });
    }
}

impl Drop for SortSpan {
    fn drop(&mut self) {
        self.finish_inner();
    }
}

///
/// TESTS
///
