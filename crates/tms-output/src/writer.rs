//! The `OutputWriter` trait implemented by output backends.

use crate::{OutputResult, RouteSnapshotRow, TickSummaryRow};

/// Sink for simulation output rows.
///
/// Errors are stored by [`SimOutputObserver`][crate::SimOutputObserver] and
/// retrieved with its `take_error`.
pub trait OutputWriter {
    /// Write a batch of route snapshots.
    fn write_snapshots(&mut self, rows: &[RouteSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
