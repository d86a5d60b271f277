//! `lift-core`: foundational types for the `rust_lift` elevator simulator.
//!
//! This crate is a dependency of every other `lift-*` crate.  It has no
//! `lift-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`ids`]      | `Floor`, `PassengerId`                                     |
//! | [`step`]     | `Step` counter                                             |
//! | [`rng`]      | `SimRng` (session-owned, seedable)                         |
//! | [`config`]   | `LiftConfig`, `ArrivalMatrix`, `BacklogConfig`             |
//! | [`state`]    | `LiftState`, `ButtonPanel`, `Direction`, `DoorState`       |
//! | [`action`]   | `Action`, `ActionSet`, `legal_actions`                     |
//! | [`error`]    | `LiftError`, `LiftResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and state types.  |

pub mod action;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod state;
pub mod step;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use action::{Action, ActionSet, ensure_legal, legal_actions};
pub use config::{ArrivalMatrix, BacklogConfig, LiftConfig, MAX_FLOORS};
pub use error::{LiftError, LiftResult};
pub use ids::{Floor, PassengerId};
pub use rng::SimRng;
pub use state::{ButtonPanel, Direction, DoorState, LiftState};
pub use step::Step;
