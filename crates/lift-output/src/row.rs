//! Plain data row types written by output backends.

use lift_core::{Action, ButtonPanel, Direction, DoorState, Floor, PassengerId, Step};
use lift_queue::Passenger;
use lift_sim::StepOutcome;

/// One simulation step: the state before, the action, and the state after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRow {
    pub step:           Step,
    pub floor:          Floor,
    pub direction:      Direction,
    pub door:           DoorState,
    pub action:         Action,
    pub next_floor:     Floor,
    pub next_direction: Direction,
    pub next_door:      DoorState,
    /// Panels of the state after the step.
    pub cabin_buttons:  ButtonPanel,
    pub call_buttons:   ButtonPanel,
    pub active_before:  usize,
    pub active_after:   usize,
    pub boarded:        usize,
    pub delivered:      usize,
    pub spawned:        usize,
}

impl From<&StepOutcome> for StepRow {
    fn from(o: &StepOutcome) -> Self {
        Self {
            step:           o.step,
            floor:          o.state.floor,
            direction:      o.state.direction,
            door:           o.state.door,
            action:         o.action,
            next_floor:     o.next.floor,
            next_direction: o.next.direction,
            next_door:      o.next.door,
            cabin_buttons:  o.next.cabin_buttons,
            call_buttons:   o.next.call_buttons,
            active_before:  o.active_before,
            active_after:   o.active_after,
            boarded:        o.boarded,
            delivered:      o.delivered.len(),
            spawned:        o.spawned.len(),
        }
    }
}

/// One completed journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripRow {
    pub passenger_id: PassengerId,
    pub start:        Floor,
    pub destination:  Floor,
    pub spawned_at:   Step,
    pub delivered_at: Step,
}

impl TripRow {
    pub fn new(passenger: &Passenger, delivered_at: Step) -> Self {
        Self {
            passenger_id: passenger.id(),
            start:        passenger.start(),
            destination:  passenger.destination(),
            spawned_at:   passenger.spawned_at(),
            delivered_at,
        }
    }

    /// Steps from arrival to delivery.
    #[inline]
    pub fn trip_steps(&self) -> u64 {
        self.delivered_at.since(self.spawned_at)
    }
}
