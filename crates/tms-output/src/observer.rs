//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use tms_core::Tick;
use tms_network::Network;
use tms_sim::SimObserver;

use crate::row::{RouteSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes a summary row every tick and one row per
/// route on snapshot ticks.
///
/// Observer hooks cannot return errors, so the first write error is kept
/// and every later one dropped.  Check [`take_error`][Self::take_error]
/// after the run.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            self.last_error.get_or_insert(e);
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, network: &Network) {
        let row = TickSummaryRow::from_network(tick.0, network);
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, network: &Network) {
        let rows: Vec<RouteSnapshotRow> = network
            .routes()
            .map(|route| RouteSnapshotRow::from_route(tick.0, route))
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
