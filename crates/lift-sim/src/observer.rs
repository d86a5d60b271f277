//! Session observer trait for telemetry and data collection.

use lift_core::{LiftState, Step};
use lift_queue::QueueStore;

use crate::StepOutcome;

/// Callbacks invoked by [`Session::run_episode`][crate::Session::run_episode]
/// and [`Session::run_steps`][crate::Session::run_steps].
///
/// Observers get read-only views of the state and queues; they cannot change
/// the simulation.  All methods have default no-op implementations.
///
/// # Example: delivery counter
///
/// ```rust,ignore
/// struct Delivered(usize);
///
/// impl SessionObserver for Delivered {
///     fn on_step(&mut self, outcome: &StepOutcome, _queues: &QueueStore) {
///         self.0 += outcome.delivered.len();
///     }
/// }
/// ```
pub trait SessionObserver {
    /// Called after `reset` has produced the initial state.
    fn on_reset(&mut self, _state: &LiftState, _queues: &QueueStore) {}

    /// Called after every step, with the queues as they are after arrivals.
    fn on_step(&mut self, _outcome: &StepOutcome, _queues: &QueueStore) {}

    /// Called once after the last step of a run.
    fn on_run_end(&mut self, _final_step: Step) {}
}

/// A [`SessionObserver`] that does nothing.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}

impl<O: SessionObserver + ?Sized> SessionObserver for &mut O {
    fn on_reset(&mut self, state: &LiftState, queues: &QueueStore) {
        (**self).on_reset(state, queues);
    }

    fn on_step(&mut self, outcome: &StepOutcome, queues: &QueueStore) {
        (**self).on_step(outcome, queues);
    }

    fn on_run_end(&mut self, final_step: Step) {
        (**self).on_run_end(final_step);
    }
}
