//! `lift-sim`: the step function and the session that drives it.
//!
//! # One step
//!
//! ```text
//! step(action):
//!   ⓪ Legality:  action must be in legal_actions(state), else InvalidAction.
//!   ① Refresh:   call buttons re-derived from the floor queues.
//!   ② Door open: serve the floor: clear its buttons, let passengers out,
//!                 board up to capacity, re-derive both panels; `door` closes.
//!   ③ Idle:      `door` opens, `up`/`down` set the direction, `noop` waits.
//!   ④ Moving:    advance one floor; the shaft ends and `stop` force
//!                 direction to none on arrival.
//!   ⑤ Arrivals:  new passengers join the floor queues AFTER the state is
//!                 final, so they first light a button on the next step.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::{Action, LiftConfig};
//! use lift_sim::Session;
//!
//! let mut session = Session::new(LiftConfig::default())?;
//! let state = session.reset();
//! let next = session.step(Action::Door)?;
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;
pub mod policy;
pub mod session;

#[cfg(test)]
mod tests;

pub use builder::SessionBuilder;
pub use engine::{Transition, transition};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SessionObserver};
pub use policy::{IdlePolicy, Policy};
pub use session::{Session, StepOutcome};
