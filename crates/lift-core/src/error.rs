//! Core error type.
//!
//! `lift-sim` wraps `LiftError` as one variant of its own `SimError`.

use thiserror::Error;

use crate::{Action, Floor};

/// The top-level error type for `lift-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum LiftError {
    /// The caller submitted an action outside `legal_actions(state)`.
    #[error("action `{action}` is not allowed in state {state}; allowed: {allowed}")]
    InvalidAction {
        action:  Action,
        state:   String,
        allowed: String,
    },

    /// Malformed arrival matrix, zero capacity, or an unusable floor count.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("floor {floor} is outside a shaft of {floors} floors")]
    FloorOutOfRange { floor: Floor, floors: usize },
}

/// Shorthand result type for all `lift-*` crates.
pub type LiftResult<T> = Result<T, LiftError>;
