use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters and timing totals for row ordering.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub perf: EventPerf,

    /// Accessor type mismatches keyed by the requested accessor type.
    pub accessor_mismatches: BTreeMap<String, u64>,
    pub since_ms: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            perf: EventPerf::default(),
            accessor_mismatches: BTreeMap::new(),
            since_ms: now_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Sort driver
    pub sort_calls: u64,
    pub bounded_sort_calls: u64,
    pub rows_sorted: u64,
    pub comparisons: u64,
    pub comparison_failures: u64,
    pub random_keys_assigned: u64,

    // Binding
    pub bucket_builds: u64,
    pub bucketed_properties: u64,
    pub plan_clones: u64,
    pub cloned_properties: u64,

    // Row access
    pub accessor_type_mismatches: u64,
}

///
/// EventPerf
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventPerf {
    pub sort_micros_total: u128,
    pub sort_micros_max: u64,
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

/// Reset all counters and timing totals.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

/// Accumulate a duration and track the max.
pub(crate) fn add_micros(total: &mut u128, max: &mut u64, delta: u64) {
    *total = total.saturating_add(u128::from(delta));
    if delta > *max {
        *max = delta;
    }
}

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Ephemeral counters since `since_ms`; `None` when the state window
    /// started before the requested window.
    pub counters: Option<EventState>,
    pub accessor_mismatches: Vec<AccessorSummary>,
    pub avg_comparisons_per_row: f64,
}

///
/// AccessorSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AccessorSummary {
    pub accessor: String,
    pub mismatches: u64,
}

/// Build a report from in-memory counters.
///
/// `window_start_ms` filters by `EventState::since_ms`, not by per-event
/// timestamps.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn report_window_start(window_start_ms: Option<u64>) -> EventReport {
    let snap = with_state(Clone::clone);
    if window_start_ms.is_some_and(|start| snap.since_ms < start) {
        return EventReport::default();
    }

    let mut accessor_mismatches: Vec<AccessorSummary> = snap
        .accessor_mismatches
        .iter()
        .map(|(accessor, mismatches)| AccessorSummary {
            accessor: accessor.clone(),
            mismatches: *mismatches,
        })
        .collect();
    accessor_mismatches.sort_by(|a, b| {
        b.mismatches
            .cmp(&a.mismatches)
            .then_with(|| a.accessor.cmp(&b.accessor))
    });

    let avg_comparisons_per_row = if snap.ops.rows_sorted > 0 {
        snap.ops.comparisons as f64 / snap.ops.rows_sorted as f64
    } else {
        0.0
    };

    EventReport {
        counters: Some(snap),
        accessor_mismatches,
        avg_comparisons_per_row,
    }
}

///
/// TESTS
///

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn reset_all_clears_state() {
        with_state_mut(|m| {
            m.ops.sort_calls = 3;
            m.ops.bucket_builds = 2;
            m.perf.sort_micros_max = 9;
            m.accessor_mismatches.insert("Int32".to_string(), 1);
        });

        reset_all();

        with_state(|m| {
            assert_eq!(m.ops.sort_calls, 0);
            assert_eq!(m.ops.bucket_builds, 0);
            assert_eq!(m.perf.sort_micros_max, 0);
            assert!(m.accessor_mismatches.is_empty());
        });
    }

    #[test]
    fn report_orders_accessors_by_mismatch_count() {
        reset_all();
        with_state_mut(|m| {
            m.ops.rows_sorted = 4;
            m.ops.comparisons = 10;
            m.accessor_mismatches.insert("Int32".to_string(), 2);
            m.accessor_mismatches.insert("Boolean".to_string(), 5);
            m.accessor_mismatches.insert("Decimal".to_string(), 2);
        });

        let report = report_window_start(None);
        let accessors: Vec<_> = report
            .accessor_mismatches
            .iter()
            .map(|a| a.accessor.as_str())
            .collect();

        assert_eq!(accessors, ["Boolean", "Decimal", "Int32"]);
        assert_eq!(report.avg_comparisons_per_row, 2.5);
    }

    #[test]
    fn report_skips_state_older_than_window() {
        reset_all();
        let since = with_state(|m| m.since_ms);

        let report = report_window_start(Some(since.saturating_add(60_000)));

        assert!(report.counters.is_none());
        assert!(report_window_start(Some(since)).counters.is_some());
    }

    #[test]
    fn add_micros_tracks_total_and_max() {
        let mut total = 0u128;
        let mut max = 0u64;

        add_micros(&mut total, &mut max, 7);
        add_micros(&mut total, &mut max, 3);

        assert_eq!(total, 10);
        assert_eq!(max, 7);
    }

    #[test]
    fn report_serializes_to_json() {
        reset_all();
        with_state_mut(|m| m.ops.sort_calls = 1);

        let json = serde_json::to_value(report_window_start(None)).expect("report serializes");

        assert_eq!(json["counters"]["ops"]["sort_calls"], 1);
    }
}
