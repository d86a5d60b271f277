//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `steps.csv`
//! - `trips.csv`
//!
//! Button panels are written as `;`-separated lists of lit floors.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, StepRow, TripRow};

pub const STEP_HEADER: [&str; 15] = [
    "step",
    "floor",
    "direction",
    "door",
    "action",
    "next_floor",
    "next_direction",
    "next_door",
    "cabin_buttons",
    "call_buttons",
    "active_before",
    "active_after",
    "boarded",
    "delivered",
    "spawned",
];

pub const TRIP_HEADER: [&str; 6] =
    ["passenger_id", "start", "destination", "spawned_at", "delivered_at", "trip_steps"];

/// Writes telemetry to two CSV files.
pub struct CsvWriter {
    steps:    Writer<File>,
    trips:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create (or truncate) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut steps = Writer::from_path(dir.join("steps.csv"))?;
        steps.write_record(STEP_HEADER)?;

        let mut trips = Writer::from_path(dir.join("trips.csv"))?;
        trips.write_record(TRIP_HEADER)?;

        Ok(Self { steps, trips, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_step(&mut self, row: &StepRow) -> OutputResult<()> {
        self.steps.write_record(&[
            row.step.0.to_string(),
            row.floor.to_string(),
            row.direction.to_string(),
            row.door.to_string(),
            row.action.to_string(),
            row.next_floor.to_string(),
            row.next_direction.to_string(),
            row.next_door.to_string(),
            row.cabin_buttons.to_string(),
            row.call_buttons.to_string(),
            row.active_before.to_string(),
            row.active_after.to_string(),
            row.boarded.to_string(),
            row.delivered.to_string(),
            row.spawned.to_string(),
        ])?;
        Ok(())
    }

    fn write_trips(&mut self, rows: &[TripRow]) -> OutputResult<()> {
        for row in rows {
            self.trips.write_record(&[
                row.passenger_id.0.to_string(),
                row.start.to_string(),
                row.destination.to_string(),
                row.spawned_at.0.to_string(),
                row.delivered_at.0.to_string(),
                row.trip_steps().to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.steps.flush()?;
        self.trips.flush()?;
        Ok(())
    }
}
