//! Hand-written controllers used by the walkthrough.

use clap::ValueEnum;
use lift_core::{Action, ActionSet, Direction, Floor, LiftState, SimRng};
use lift_sim::Policy;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    Up,
    Alternate,
    Nearest,
}

impl PolicyKind {
    pub fn build(self) -> Box<dyn Policy> {
        match self {
            PolicyKind::Up        => Box::new(UpPolicy),
            PolicyKind::Alternate => Box::new(AlternatePolicy),
            PolicyKind::Nearest   => Box::new(NearestRequestPolicy::default()),
        }
    }
}

/// Closes the door, then heads up whenever it can.
pub struct UpPolicy;

impl Policy for UpPolicy {
    fn choose(&mut self, state: &LiftState, legal: ActionSet, _rng: &mut SimRng) -> Action {
        if state.door_open() {
            Action::Door
        } else if legal.contains(Action::Up) {
            Action::Up
        } else {
            Action::Noop
        }
    }

    fn name(&self) -> &str {
        "up"
    }
}

/// Sweeps the whole shaft: up from the ground floor, down from the top.
/// Never opens the door, so nobody boards; useful as a lower bound.
pub struct AlternatePolicy;

impl Policy for AlternatePolicy {
    fn choose(&mut self, state: &LiftState, _legal: ActionSet, _rng: &mut SimRng) -> Action {
        if state.door_open() {
            Action::Door
        } else if state.direction.is_moving() {
            Action::Noop
        } else if state.at_top() {
            Action::Down
        } else {
            Action::Up
        }
    }

    fn name(&self) -> &str {
        "alternate"
    }
}

/// Serves the current floor when one of its buttons is lit, otherwise heads
/// for the nearest lit button and stops on arrival.
///
/// A call button that stays lit after the door cycles means the cabin was
/// full; the floor is not reopened until the lift has moved away, unless
/// no other button is lit.
#[derive(Default)]
pub struct NearestRequestPolicy {
    served: Option<Floor>,
}

impl NearestRequestPolicy {
    fn wanted(&self, state: &LiftState, floor: Floor) -> bool {
        state.cabin_buttons.is_lit(floor)
            || (state.call_buttons.is_lit(floor) && self.served != Some(floor))
    }

    fn nearest(state: &LiftState) -> Option<Floor> {
        let here = state.floor.0 as i32;
        state
            .cabin_buttons
            .lit()
            .chain(state.call_buttons.lit())
            .filter(|&f| f != state.floor)
            .min_by_key(|f| ((f.0 as i32 - here).abs(), f.0))
    }
}

impl Policy for NearestRequestPolicy {
    fn choose(&mut self, state: &LiftState, legal: ActionSet, _rng: &mut SimRng) -> Action {
        if state.door_open() {
            return Action::Door;
        }
        if self.served != Some(state.floor) {
            self.served = None;
        }

        // Moving: stop at the next floor if somebody wants it.
        match state.direction {
            Direction::Up if !state.at_top() => {
                return if self.wanted(state, state.floor.above()) { Action::Stop } else { Action::Noop };
            }
            Direction::Down if !state.at_ground() => {
                return if self.wanted(state, state.floor.below()) { Action::Stop } else { Action::Noop };
            }
            Direction::Up | Direction::Down => return Action::Noop,
            Direction::None => {}
        }

        if self.wanted(state, state.floor) {
            self.served = Some(state.floor);
            return Action::Door;
        }

        match Self::nearest(state) {
            Some(target) if target > state.floor && legal.contains(Action::Up) => Action::Up,
            Some(target) if target < state.floor && legal.contains(Action::Down) => Action::Down,
            // Nothing else to do: try the current floor again.
            _ if state.call_buttons.is_lit(state.floor) => Action::Door,
            _ => Action::Noop,
        }
    }

    fn name(&self) -> &str {
        "nearest"
    }
}
