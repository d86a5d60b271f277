//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, StepRow, TripRow};

/// Trait implemented by telemetry backends.
///
/// Errors are stored by [`SessionOutputObserver`](crate::SessionOutputObserver)
/// and retrieved with `take_error`, since observer hooks cannot fail.
pub trait OutputWriter {
    fn write_step(&mut self, row: &StepRow) -> OutputResult<()>;

    /// Write a batch of completed trips.
    fn write_trips(&mut self, rows: &[TripRow]) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
