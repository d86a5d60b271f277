//! The transition function.
//!
//! [`transition`] applies one legal action to a state, mutating the queues as
//! a side effect, and returns the next state.  It does not draw arrivals;
//! the session does that afterwards so newly spawned passengers are not
//! reflected in the state computed here.

use lift_core::{Action, Direction, DoorState, Floor, LiftResult, LiftState, ensure_legal};
use lift_queue::{Passenger, QueueStore};

/// Result of one transition.
#[derive(Debug)]
pub struct Transition {
    pub next:      LiftState,
    /// Passengers moved from the floor queue into the cabin.
    pub boarded:   usize,
    /// Passengers who left the cabin at their destination.
    pub delivered: Vec<Passenger>,
}

/// Apply `action` to `state`.
///
/// # Errors
/// [`LiftError::InvalidAction`](lift_core::LiftError::InvalidAction) if
/// `action` is not in `legal_actions(state)`.  The queues are untouched in
/// that case.
///
/// # Panics
/// `state` and `queues` must describe the same shaft.  A mismatch is caught
/// by a debug assertion; release builds panic on the first out-of-range
/// floor index instead.
pub fn transition(
    state:        &LiftState,
    action:       Action,
    queues:       &mut QueueStore,
    max_capacity: usize,
) -> LiftResult<Transition> {
    debug_assert_eq!(state.floors(), queues.floors(), "state and queues cover different shafts");
    ensure_legal(state, action)?;

    let mut next = *state;
    let mut boarded = 0;
    let mut delivered = Vec::new();

    // ① Anyone waiting lights their floor; refreshing first is idempotent.
    next.call_buttons = queues.call_panel();

    if state.door == DoorState::Open {
        // ② Door open: the current floor is being served this step.
        let floor = state.floor;
        next.cabin_buttons.clear(floor);
        next.call_buttons.clear(floor);

        delivered = queues.disembark(floor);
        boarded = queues.admit(floor, max_capacity);

        next.cabin_buttons = queues.cabin_panel();
        // Whoever did not fit keeps the call button lit.
        if queues.waiting_at(floor) > 0 {
            next.call_buttons.press(floor);
        }

        if action == Action::Door {
            next.door = DoorState::Closed;
        }
    } else if state.direction == Direction::None {
        // ③ Stationary with the door closed.
        match action {
            Action::Door => next.door = DoorState::Open,
            Action::Up   => next.direction = Direction::Up,
            Action::Down => next.direction = Direction::Down,
            Action::Noop | Action::Stop => {}
        }
    } else {
        // ④ Moving.
        let (floor, direction) = advance(state);
        next.floor = floor;
        next.direction = if action == Action::Stop { Direction::None } else { direction };
    }

    // The cabin only changes with the door open; deriving it here as well
    // keeps hand-built states consistent with their queues.
    next.cabin_buttons = queues.cabin_panel();

    Ok(Transition { next, boarded, delivered })
}

/// Move one floor in the current direction.  Arriving at either end of the
/// shaft forces the direction to `None`.
fn advance(state: &LiftState) -> (Floor, Direction) {
    match state.direction {
        Direction::Up if !state.at_top() => {
            let floor = state.floor.above();
            let direction = if floor == state.top_floor() { Direction::None } else { Direction::Up };
            (floor, direction)
        }
        Direction::Down if !state.at_ground() => {
            let floor = state.floor.below();
            let direction = if floor == Floor::GROUND { Direction::None } else { Direction::Down };
            (floor, direction)
        }
        // Already at the end it is heading for: it cannot leave the shaft.
        _ => (state.floor, Direction::None),
    }
}
