//! The `Policy` trait, the extension point for control code.

use lift_core::{Action, ActionSet, LiftState, SimRng};

/// Pluggable lift controller.
///
/// Called once per step with the current state and its legal action set.
/// The returned action must be a member of `legal`; the session aborts the
/// run with `InvalidAction` otherwise.
///
/// `rng` is a stream owned by the session for policy use only, so an
/// exploring policy never perturbs the passenger arrival sequence.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysUp;
///
/// impl Policy for AlwaysUp {
///     fn choose(&mut self, state: &LiftState, legal: ActionSet, _rng: &mut SimRng) -> Action {
///         if legal.contains(Action::Up) { Action::Up } else if state.door_open() { Action::Door } else { Action::Noop }
///     }
/// }
/// ```
pub trait Policy {
    fn choose(&mut self, state: &LiftState, legal: ActionSet, rng: &mut SimRng) -> Action;

    /// Short name for logs and output file names.
    fn name(&self) -> &str {
        "policy"
    }
}

impl<P: Policy + ?Sized> Policy for &mut P {
    fn choose(&mut self, state: &LiftState, legal: ActionSet, rng: &mut SimRng) -> Action {
        (**self).choose(state, legal, rng)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn choose(&mut self, state: &LiftState, legal: ActionSet, rng: &mut SimRng) -> Action {
        (**self).choose(state, legal, rng)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A [`Policy`] that closes an open door and otherwise waits.
///
/// Useful as a placeholder in tests: the lift never moves.
pub struct IdlePolicy;

impl Policy for IdlePolicy {
    fn choose(&mut self, state: &LiftState, _legal: ActionSet, _rng: &mut SimRng) -> Action {
        if state.door_open() { Action::Door } else { Action::Noop }
    }

    fn name(&self) -> &str {
        "idle"
    }
}
