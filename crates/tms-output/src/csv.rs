//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `route_snapshots.csv`: `tick,route,signal,congestion,speed`
//! - `tick_summaries.csv`: `tick,green_routes,mean_congestion`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, RouteSnapshotRow, TickSummaryRow};

pub const SNAPSHOT_FILE: &str = "route_snapshots.csv";
pub const SUMMARY_FILE: &str = "tick_summaries.csv";

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join(SNAPSHOT_FILE))?;
        snapshots.write_record(["tick", "route", "signal", "congestion", "speed"])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summaries.write_record(["tick", "green_routes", "mean_congestion"])?;

        Ok(Self { snapshots, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[RouteSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            // Unlit routes get an empty signal column.
            let signal = row.signal.map(|s| s.as_str()).unwrap_or("");
            self.snapshots.write_record([
                row.tick.to_string().as_str(),
                row.route.as_str(),
                signal,
                row.congestion.to_string().as_str(),
                row.speed.to_string().as_str(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.green_routes.to_string(),
            row.mean_congestion.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
