use crate::{
    config::ExecutionConfig,
    db::{row::Row, sort::QueryComparer},
    error::InternalError,
    obs::sink::{SortKind, SortSpan},
};
use std::cmp::Ordering;

///
/// RowSorter
///
/// Sort step of query execution. Orders a buffer of rows with a query
/// comparer; a failed comparison aborts the pass and leaves no partial
/// result behind.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct RowSorter {
    debug: bool,
}

impl RowSorter {
    #[must_use]
    pub const fn new() -> Self {
        Self { debug: false }
    }

    #[must_use]
    pub const fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    #[must_use]
    pub const fn from_config(config: &ExecutionConfig) -> Self {
        Self {
            debug: config.debug,
        }
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.debug {
            println!("[debug] {}", s.as_ref());
        }
    }

    /// Sort `rows` in place (stable). On error the buffer is cleared.
    pub fn sort(&self, rows: &mut Vec<Row>, comparer: &QueryComparer) -> Result<(), InternalError> {
        let mut span = SortSpan::new(SortKind::Full, rows.len());
        self.debug_log(format!(
            "sorting {} rows on {} key(s)",
            rows.len(),
            comparer.key_count()
        ));

        let mut pass = Pass::new(comparer);
        let result = merge_sort(std::mem::take(rows), &mut pass);

        self.finish(rows, result, &pass, &mut span)
    }

    /// Keep only the first `keep` rows in order, sorted. On error the buffer
    /// is cleared.
    pub fn sort_bounded(
        &self,
        rows: &mut Vec<Row>,
        comparer: &QueryComparer,
        keep: usize,
    ) -> Result<(), InternalError> {
        let mut span = SortSpan::new(SortKind::Bounded, rows.len());
        self.debug_log(format!(
            "sorting {} rows on {} key(s), keeping {keep}",
            rows.len(),
            comparer.key_count()
        ));

        let mut pass = Pass::new(comparer);
        let result = top_k(std::mem::take(rows), keep, &mut pass);

        self.finish(rows, result, &pass, &mut span)
    }

    fn finish(
        &self,
        rows: &mut Vec<Row>,
        result: Result<Vec<Row>, InternalError>,
        pass: &Pass<'_>,
        span: &mut SortSpan,
    ) -> Result<(), InternalError> {
        span.set_comparisons(pass.comparisons);

        match result {
            Ok(sorted) => {
                *rows = sorted;
                self.debug_log(format!(
                    "sorted {} rows with {} comparisons",
                    rows.len(),
                    pass.comparisons
                ));

                Ok(())
            }
            Err(err) => {
                span.mark_failed();
                self.debug_log(format!(
                    "sort failed after {} comparisons: {}",
                    pass.comparisons,
                    err.display_with_class()
                ));

                Err(err)
            }
        }
    }
}

///
/// Pass
///
/// Comparison state of one sort pass.
///

struct Pass<'a> {
    comparer: &'a QueryComparer,
    comparisons: u64,
}

impl<'a> Pass<'a> {
    const fn new(comparer: &'a QueryComparer) -> Self {
        Self {
            comparer,
            comparisons: 0,
        }
    }

    fn compare(&mut self, left: &Row, right: &Row) -> Result<Ordering, InternalError> {
        self.comparisons = self.comparisons.saturating_add(1);

        self.comparer.compare(left, right)
    }
}

// Stable top-down merge sort over a fallible comparison; the first error
// aborts the pass.
fn merge_sort(mut rows: Vec<Row>, pass: &mut Pass<'_>) -> Result<Vec<Row>, InternalError> {
    if rows.len() < 2 {
        return Ok(rows);
    }

    let right = rows.split_off(rows.len() / 2);
    let left = merge_sort(rows, pass)?;
    let right = merge_sort(right, pass)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        // Take from the right only when strictly smaller, keeping ties stable.
        let next = if pass.compare(r, l)? == Ordering::Less {
            right.next()
        } else {
            left.next()
        };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);

    Ok(merged)
}

// Bounded selection: binary-insert each row into a sorted buffer of at most
// `keep` rows. Equal rows insert after their peers, so the result is stable.
fn top_k(rows: Vec<Row>, keep: usize, pass: &mut Pass<'_>) -> Result<Vec<Row>, InternalError> {
    let mut kept: Vec<Row> = Vec::with_capacity(keep.min(rows.len()));
    if keep == 0 {
        return Ok(kept);
    }

    for row in rows {
        let (mut lo, mut hi) = (0, kept.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if pass.compare(&row, &kept[mid])? == Ordering::Less {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }

        if lo < keep {
            if kept.len() == keep {
                kept.pop();
            }
            kept.insert(lo, row);
        }
    }

    Ok(kept)
}
