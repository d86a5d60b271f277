//! `SessionOutputObserver<W>` bridges `SessionObserver` to an `OutputWriter`.

use lift_core::Step;
use lift_queue::QueueStore;
use lift_sim::{SessionObserver, StepOutcome};

use crate::row::{StepRow, TripRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SessionObserver`] that records every step and every completed trip.
///
/// Errors from the writer are stored internally because observer hooks have
/// no return value.  After the run returns, check with
/// [`take_error`][Self::take_error].
pub struct SessionOutputObserver<W: OutputWriter> {
    writer:     W,
    steps:      u64,
    trips:      u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SessionOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, steps: 0, trips: 0, last_error: None }
    }

    /// Take the stored write error (if any).  `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Step rows written so far.
    pub fn steps_written(&self) -> u64 {
        self.steps
    }

    /// Trip rows written so far.
    pub fn trips_written(&self) -> u64 {
        self.trips
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SessionObserver for SessionOutputObserver<W> {
    fn on_step(&mut self, outcome: &StepOutcome, _queues: &QueueStore) {
        let result = self.writer.write_step(&StepRow::from(outcome));
        if result.is_ok() {
            self.steps += 1;
        }
        self.store_err(result);

        if !outcome.delivered.is_empty() {
            let rows: Vec<TripRow> = outcome
                .delivered
                .iter()
                .map(|p| TripRow::new(p, outcome.step))
                .collect();
            let result = self.writer.write_trips(&rows);
            if result.is_ok() {
                self.trips += rows.len() as u64;
            }
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _final_step: Step) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
