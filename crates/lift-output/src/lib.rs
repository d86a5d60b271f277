//! `lift-output`: simulation telemetry writers for the rust_lift simulator.
//!
//! | Backend | Files created               |
//! |---------|-----------------------------|
//! | CSV     | `steps.csv`, `trips.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SessionOutputObserver`], which implements `lift_sim::SessionObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lift_output::{CsvWriter, SessionOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SessionOutputObserver::new(writer);
//! session.run_episode(&mut policy, 1_000, &mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SessionOutputObserver;
pub use row::{StepRow, TripRow};
pub use writer::OutputWriter;
