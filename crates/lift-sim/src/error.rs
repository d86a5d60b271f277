use lift_core::LiftError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Lift(#[from] LiftError),

    #[error("session configuration error: {0}")]
    Config(String),
}

impl SimError {
    /// `true` when a caller (usually a policy) submitted an illegal action.
    pub fn is_invalid_action(&self) -> bool {
        matches!(self, SimError::Lift(LiftError::InvalidAction { .. }))
    }
}

pub type SimResult<T> = Result<T, SimError>;
