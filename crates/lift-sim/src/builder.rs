//! Fluent builder for constructing a [`Session`].

use lift_core::{Floor, LiftConfig, LiftError};

use crate::{Session, SimError, SimResult};

/// Fluent builder for [`Session`].
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                        |
/// |------------------------|------------------------------------------------|
/// | `.start_floor(f)`      | Uniformly random floor on every reset          |
/// | `.passengers(v)`       | Random backlog drawn from the arrival model    |
///
/// Both options are mainly for scripted scenarios and tests; they apply to
/// every subsequent `reset`.
///
/// # Example
///
/// ```rust,ignore
/// let session = SessionBuilder::new(config)
///     .start_floor(Floor(1))
///     .passengers(vec![(Floor(0), Floor(2))])
///     .build()?;
/// ```
pub struct SessionBuilder {
    config:      LiftConfig,
    start_floor: Option<Floor>,
    passengers:  Option<Vec<(Floor, Floor)>>,
}

impl SessionBuilder {
    pub fn new(config: LiftConfig) -> Self {
        Self { config, start_floor: None, passengers: None }
    }

    /// Always reset to `floor` instead of a random floor.
    pub fn start_floor(mut self, floor: Floor) -> Self {
        self.start_floor = Some(floor);
        self
    }

    /// Always reset with exactly these `(start, destination)` passengers
    /// waiting, in this order, instead of a random backlog.
    pub fn passengers(mut self, passengers: Vec<(Floor, Floor)>) -> Self {
        self.passengers = Some(passengers);
        self
    }

    /// Validate inputs and return a session that has already been reset.
    pub fn build(self) -> SimResult<Session> {
        self.config.validate()?;
        let floors = self.config.floors();

        if let Some(floor) = self.start_floor {
            check_floor(floor, floors)?;
        }

        if let Some(passengers) = &self.passengers {
            for &(start, destination) in passengers {
                check_floor(start, floors)?;
                check_floor(destination, floors)?;
                if start == destination {
                    return Err(SimError::Config(format!(
                        "scripted passenger starts and ends at floor {start}"
                    )));
                }
            }
        }

        Ok(Session::assemble(self.config, self.start_floor, self.passengers))
    }
}

fn check_floor(floor: Floor, floors: usize) -> SimResult<()> {
    if floor.index() >= floors {
        return Err(LiftError::FloorOutOfRange { floor, floors }.into());
    }
    Ok(())
}
