//! Tests for the transition engine and the session lifecycle.

use lift_core::{Action, ArrivalMatrix, Floor, LiftConfig, LiftState, SimRng, Step};
use lift_queue::QueueStore;

use crate::{Session, SessionBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A shaft of `floors` floors where nobody ever arrives on their own.
fn quiet_config(floors: usize, max_capacity: usize) -> LiftConfig {
    LiftConfig {
        max_capacity,
        arrivals: ArrivalMatrix::uniform(floors, 0.0).unwrap(),
        ..LiftConfig::default()
    }
}

fn busy_config(seed: u64) -> LiftConfig {
    LiftConfig {
        max_capacity: 2,
        arrivals: ArrivalMatrix::uniform(5, 0.02).unwrap(),
        seed,
        ..LiftConfig::default()
    }
}

fn idle_at(floor: u8, floors: usize) -> LiftState {
    LiftState::idle(Floor(floor), floors).unwrap()
}

// ── Engine ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine_tests {
    use lift_core::{Direction, DoorState};

    use super::*;
    use crate::transition;

    #[test]
    fn door_opens_without_touching_queues() {
        let mut q = QueueStore::new(3);
        q.spawn(Floor(1), Floor(2), Step(0));
        let t = transition(&idle_at(1, 3), Action::Door, &mut q, 4).unwrap();

        assert_eq!(t.next.door, DoorState::Open);
        assert_eq!(t.boarded, 0);
        assert_eq!(q.waiting_at(Floor(1)), 1);
        assert!(t.next.call_buttons.is_lit(Floor(1)));
    }

    #[test]
    fn open_door_serves_floor_then_closes() {
        let mut q = QueueStore::new(4);
        q.spawn(Floor(0), Floor(2), Step(0));
        q.admit(Floor(0), 4);
        q.spawn(Floor(2), Floor(3), Step(0));

        let mut s = idle_at(2, 4);
        s.door = DoorState::Open;
        s.cabin_buttons = q.cabin_panel();

        let t = transition(&s, Action::Door, &mut q, 4).unwrap();
        assert_eq!(t.delivered.len(), 1);
        assert_eq!(t.delivered[0].destination(), Floor(2));
        assert_eq!(t.boarded, 1);
        assert_eq!(t.next.door, DoorState::Closed);
        assert_eq!(t.next.cabin_buttons.lit().collect::<Vec<_>>(), vec![Floor(3)]);
        assert!(!t.next.call_buttons.is_lit(Floor(2)));
    }

    #[test]
    fn full_cabin_keeps_call_button_lit() {
        let mut q = QueueStore::new(3);
        q.spawn(Floor(0), Floor(2), Step(0));
        q.admit(Floor(0), 1);
        q.spawn(Floor(0), Floor(1), Step(0));
        q.spawn(Floor(0), Floor(2), Step(0));

        let mut s = idle_at(0, 3);
        s.door = DoorState::Open;

        let t = transition(&s, Action::Door, &mut q, 1).unwrap();
        assert_eq!(t.boarded, 0);
        assert!(t.delivered.is_empty());
        assert!(t.next.call_buttons.is_lit(Floor(0)));
        assert!(t.next.cabin_buttons.is_lit(Floor(2)));
        assert_eq!(q.waiting_at(Floor(0)), 2);
    }

    #[test]
    fn partial_boarding_leaves_rest_waiting() {
        let mut q = QueueStore::new(3);
        for _ in 0..3 {
            q.spawn(Floor(1), Floor(2), Step(0));
        }
        let mut s = idle_at(1, 3);
        s.door = DoorState::Open;

        let t = transition(&s, Action::Door, &mut q, 2).unwrap();
        assert_eq!(t.boarded, 2);
        assert_eq!(q.cabin_len(), 2);
        assert!(t.next.call_buttons.is_lit(Floor(1)));
    }

    #[test]
    fn up_and_down_only_set_direction() {
        let mut q = QueueStore::new(5);
        let t = transition(&idle_at(2, 5), Action::Up, &mut q, 4).unwrap();
        assert_eq!((t.next.floor, t.next.direction), (Floor(2), Direction::Up));

        let t = transition(&idle_at(2, 5), Action::Down, &mut q, 4).unwrap();
        assert_eq!((t.next.floor, t.next.direction), (Floor(2), Direction::Down));

        let t = transition(&idle_at(2, 5), Action::Noop, &mut q, 4).unwrap();
        assert_eq!(t.next, idle_at(2, 5));
    }

    #[test]
    fn moving_advances_one_floor_and_keeps_going() {
        let mut q = QueueStore::new(5);
        let mut s = idle_at(1, 5);
        s.direction = Direction::Up;
        let t = transition(&s, Action::Noop, &mut q, 4).unwrap();
        assert_eq!((t.next.floor, t.next.direction), (Floor(2), Direction::Up));

        s.direction = Direction::Down;
        let t = transition(&s, Action::Noop, &mut q, 4).unwrap();
        assert_eq!((t.next.floor, t.next.direction), (Floor(0), Direction::None));
    }

    #[test]
    fn stop_is_honoured_on_arrival() {
        let mut q = QueueStore::new(5);
        let mut s = idle_at(3, 5);
        s.direction = Direction::Down;
        let t = transition(&s, Action::Stop, &mut q, 4).unwrap();
        assert_eq!((t.next.floor, t.next.direction), (Floor(2), Direction::None));
    }

    #[test]
    fn shaft_ends_force_direction_none() {
        let mut q = QueueStore::new(5);
        let mut s = idle_at(3, 5);
        s.direction = Direction::Up;
        let t = transition(&s, Action::Noop, &mut q, 4).unwrap();
        assert_eq!((t.next.floor, t.next.direction), (Floor(4), Direction::None));

        let t = transition(&s, Action::Stop, &mut q, 4).unwrap();
        assert_eq!((t.next.floor, t.next.direction), (Floor(4), Direction::None));
    }

    #[test]
    fn hand_built_state_cannot_leave_the_shaft() {
        let mut q = QueueStore::new(3);
        let mut s = idle_at(2, 3);
        s.direction = Direction::Up;
        let t = transition(&s, Action::Noop, &mut q, 4).unwrap();
        assert_eq!((t.next.floor, t.next.direction), (Floor(2), Direction::None));

        let mut s = idle_at(0, 3);
        s.direction = Direction::Down;
        let t = transition(&s, Action::Noop, &mut q, 4).unwrap();
        assert_eq!((t.next.floor, t.next.direction), (Floor(0), Direction::None));
    }

    #[test]
    #[should_panic]
    fn mismatched_shaft_is_rejected() {
        let mut q = QueueStore::new(3);
        let mut s = idle_at(4, 6);
        s.door = DoorState::Open;
        let _ = transition(&s, Action::Door, &mut q, 4);
    }

    #[test]
    fn illegal_action_leaves_queues_alone() {
        let mut q = QueueStore::new(3);
        q.spawn(Floor(0), Floor(2), Step(0));
        let mut s = idle_at(0, 3);
        s.door = DoorState::Open;

        assert!(transition(&s, Action::Noop, &mut q, 4).is_err());
        assert_eq!(q.waiting_at(Floor(0)), 1);
        assert!(transition(&idle_at(0, 3), Action::Down, &mut q, 4).is_err());
        assert!(transition(&idle_at(2, 3), Action::Up, &mut q, 4).is_err());
        assert!(transition(&idle_at(1, 3), Action::Stop, &mut q, 4).is_err());
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use lift_core::LiftError;

    use super::*;
    use crate::SimError;

    #[test]
    fn zero_capacity_is_rejected() {
        let err = Session::new(quiet_config(3, 0)).err().unwrap();
        assert!(matches!(err, SimError::Lift(LiftError::Config(_))));
    }

    #[test]
    fn start_floor_outside_shaft_is_rejected() {
        let result = SessionBuilder::new(quiet_config(3, 1)).start_floor(Floor(3)).build();
        assert!(matches!(result, Err(SimError::Lift(LiftError::FloorOutOfRange { .. }))));
    }

    #[test]
    fn scripted_passengers_are_validated() {
        let result = SessionBuilder::new(quiet_config(3, 1))
            .passengers(vec![(Floor(0), Floor(5))])
            .build();
        assert!(result.is_err());

        let result = SessionBuilder::new(quiet_config(3, 1))
            .passengers(vec![(Floor(1), Floor(1))])
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn built_session_is_already_reset() {
        let session = SessionBuilder::new(quiet_config(4, 2)).start_floor(Floor(3)).build().unwrap();
        assert_eq!(session.state().floor, Floor(3));
        assert_eq!(session.clock(), Step::ZERO);
        assert_eq!(session.floors(), 4);
    }
}

// ── Reset ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod reset_tests {
    use lift_core::{Direction, DoorState};

    use super::*;

    #[test]
    fn reset_state_is_idle_and_consistent() {
        let mut session = Session::new(LiftConfig::default()).unwrap();
        for _ in 0..50 {
            let s = session.reset();
            assert_eq!(s.direction, Direction::None);
            assert_eq!(s.door, DoorState::Closed);
            assert_eq!(s.call_buttons, session.queues().call_panel());
            assert_eq!(s.cabin_buttons, session.queues().cabin_panel());
            // Everyone waiting at the start floor has boarded.
            assert_eq!(session.queues().waiting_at(s.floor), 0);
            assert_eq!(session.active_passenger_count(), session.queues().spawned_total() as usize);
        }
    }

    #[test]
    fn bootstrap_boarding_may_exceed_capacity() {
        let script = vec![(Floor(0), Floor(1)), (Floor(0), Floor(2)), (Floor(0), Floor(2))];
        let session = SessionBuilder::new(quiet_config(3, 1))
            .start_floor(Floor(0))
            .passengers(script)
            .build()
            .unwrap();
        assert_eq!(session.queues().cabin_len(), 3);
        assert_eq!(session.state().cabin_buttons.to_vec(), vec![false, true, true]);
        assert!(!session.state().call_buttons.any());
    }

    #[test]
    fn initial_floor_is_uniform() {
        let mut session = Session::new(LiftConfig { seed: 1234, ..LiftConfig::default() }).unwrap();
        let floors = session.floors();
        let mut counts = vec![0usize; floors];
        for _ in 0..1000 {
            counts[session.reset().floor.index()] += 1;
        }
        // 1000 / 7 ≈ 143 per floor; the bounds are over 4 standard deviations wide.
        for (floor, &n) in counts.iter().enumerate() {
            assert!((90..=200).contains(&n), "floor {floor} drawn {n} times: {counts:?}");
        }
    }

    #[test]
    fn reset_clears_previous_episode() {
        let mut session = Session::new(busy_config(3)).unwrap();
        for _ in 0..200 {
            let action = if session.state().door_open() { Action::Door } else { Action::Noop };
            session.step(action).unwrap();
        }
        session.reset();
        assert_eq!(session.clock(), Step::ZERO);
        assert!(session.queues().cabin().iter().all(|p| p.spawned_at() == Step::ZERO));
    }

    #[test]
    fn same_seed_same_episodes() {
        let run = || {
            let mut session = Session::new(busy_config(77)).unwrap();
            (0..20).map(|_| session.reset()).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn reseed_restarts_the_stream() {
        let mut session = Session::new(busy_config(5)).unwrap();
        let initial = *session.state();
        let first: Vec<_> = (0..4).map(|_| session.reset()).collect();

        // Construction already consumed one reset from the fresh stream.
        session.reseed(5);
        let again: Vec<_> = (0..5).map(|_| session.reset()).collect();
        assert_eq!(again[0], initial);
        assert_eq!(again[1..], first[..]);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use lift_core::{Direction, DoorState};

    use super::*;

    #[test]
    fn three_floor_ride_to_the_top() {
        let mut session = SessionBuilder::new(quiet_config(3, 4))
            .start_floor(Floor(1))
            .passengers(vec![(Floor(1), Floor(2)), (Floor(2), Floor(0))])
            .build()
            .unwrap();

        let s = *session.state();
        assert_eq!((s.floor, s.direction, s.door), (Floor(1), Direction::None, DoorState::Closed));
        assert!(session.legal_actions().contains(Action::Up));
        assert!(session.legal_actions().contains(Action::Down));
        assert!(s.cabin_buttons.is_lit(Floor(2)));
        assert!(s.call_buttons.is_lit(Floor(2)));

        let s = session.step(Action::Up).unwrap();
        assert_eq!((s.floor, s.direction), (Floor(1), Direction::Up));

        let s = session.step(Action::Noop).unwrap();
        assert_eq!((s.floor, s.direction), (Floor(2), Direction::None));

        let s = session.step(Action::Door).unwrap();
        assert_eq!(s.door, DoorState::Open);
        assert_eq!(session.queues().cabin_len(), 1);

        let outcome = session.advance(Action::Door).unwrap();
        assert_eq!(outcome.next.door, DoorState::Closed);
        assert_eq!(outcome.delivered.len(), 1);
        assert_eq!(outcome.boarded, 1);
        assert_eq!(outcome.next.cabin_buttons.lit().collect::<Vec<_>>(), vec![Floor(0)]);
        assert!(!outcome.next.call_buttons.any());
        assert_eq!(session.clock(), Step(4));
    }

    #[test]
    fn full_cabin_leaves_call_button_lit() {
        let mut session = SessionBuilder::new(quiet_config(3, 1))
            .start_floor(Floor(1))
            .passengers(vec![(Floor(1), Floor(2)), (Floor(0), Floor(1)), (Floor(0), Floor(2))])
            .build()
            .unwrap();
        assert_eq!(session.queues().cabin_len(), 1);

        session.step(Action::Down).unwrap();
        let s = session.step(Action::Noop).unwrap();
        assert_eq!((s.floor, s.direction), (Floor(0), Direction::None));
        session.step(Action::Door).unwrap();

        let outcome = session.advance(Action::Door).unwrap();
        assert_eq!(outcome.boarded, 0);
        assert!(outcome.next.call_buttons.is_lit(Floor(0)));
        assert_eq!(session.queues().waiting_at(Floor(0)), 2);
    }

    #[test]
    fn illegal_action_is_reported_and_changes_nothing() {
        let mut session = SessionBuilder::new(quiet_config(3, 1)).start_floor(Floor(0)).build().unwrap();
        let before = *session.state();

        let err = session.step(Action::Down).unwrap_err();
        assert!(err.is_invalid_action());
        assert_eq!(*session.state(), before);
        assert_eq!(session.clock(), Step::ZERO);
    }

    #[test]
    fn new_arrivals_light_buttons_one_step_late() {
        let config = LiftConfig {
            arrivals: ArrivalMatrix::uniform(3, 1.0).unwrap(),
            ..quiet_config(3, 4)
        };
        let mut session = SessionBuilder::new(config)
            .start_floor(Floor(0))
            .passengers(vec![])
            .build()
            .unwrap();
        assert!(!session.state().call_buttons.any());

        let outcome = session.advance(Action::Noop).unwrap();
        assert_eq!(outcome.spawned.len(), 6);
        assert!(!outcome.next.call_buttons.any());

        let s = session.step(Action::Noop).unwrap();
        assert_eq!(s.call_buttons.to_vec(), vec![true, true, true]);
    }
}

// ── Properties over random runs ───────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use std::collections::HashSet;

    use lift_core::{ActionSet, Direction, LiftState, PassengerId};

    use super::*;
    use crate::{NoopObserver, Policy, StepOutcome};

    /// Picks uniformly among the legal actions.
    struct RandomPolicy;

    impl Policy for RandomPolicy {
        fn choose(&mut self, _state: &LiftState, legal: ActionSet, rng: &mut SimRng) -> Action {
            rng.pick_action(legal).unwrap()
        }
    }

    fn check_invariants(session: &Session, outcome: &StepOutcome) {
        let next = outcome.next;
        let queues = session.queues();
        let floors = session.floors();
        let fresh: HashSet<PassengerId> = outcome.spawned.iter().copied().collect();

        // Legality closure.
        assert!(!lift_core::legal_actions(&next).is_empty());

        // Button/queue consistency; this step's arrivals are not yet visible.
        for f in 0..floors as u8 {
            let floor = Floor(f);
            let waiting = queues.waiting(floor).any(|p| !fresh.contains(&p.id()));
            assert_eq!(next.call_buttons.is_lit(floor), waiting, "call {f} at {}", outcome.step);
            let wanted = queues.cabin().iter().any(|p| p.destination() == floor);
            assert_eq!(next.cabin_buttons.is_lit(floor), wanted, "cabin {f} at {}", outcome.step);
        }

        // Shaft bounds.
        assert!(next.floor.index() < floors);
        if next.floor != outcome.state.floor && (next.at_top() || next.at_ground()) {
            assert_eq!(next.direction, Direction::None);
        }
        if next.direction.is_moving() {
            assert!(!next.door_open());
        }

        // Capacity.
        if outcome.boarded > 0 {
            assert!(queues.cabin_len() <= session.config().max_capacity);
        }

        // Conservation.
        assert_eq!(
            outcome.active_after,
            outcome.active_before - outcome.delivered.len() + outcome.spawned.len()
        );
        assert_eq!(outcome.active_after, session.active_passenger_count());
        assert!(outcome.delivered.iter().all(|p| p.destination() == outcome.state.floor));
    }

    #[test]
    fn random_policy_keeps_every_invariant() {
        for seed in 0..5 {
            let mut session = Session::new(busy_config(seed)).unwrap();
            let mut rng = SimRng::new(seed + 100);
            let mut delivered = 0;
            for _ in 0..3000 {
                let action = rng.pick_action(session.legal_actions()).unwrap();
                let outcome = session.advance(action).unwrap();
                check_invariants(&session, &outcome);
                delivered += outcome.delivered.len();
            }
            assert!(delivered > 0, "seed {seed} never delivered anyone");
        }
    }

    #[test]
    fn identical_seeds_give_identical_trajectories() {
        let trace = || {
            let mut session = Session::new(busy_config(9)).unwrap();
            let mut rng = SimRng::new(1);
            (0..500)
                .map(|_| {
                    let action = rng.pick_action(session.legal_actions()).unwrap();
                    session.step(action).unwrap()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(trace(), trace());
    }

    #[test]
    fn run_episode_drives_policy_and_observer() {
        #[derive(Default)]
        struct Counter {
            resets: usize,
            steps:  usize,
            ended:  Option<Step>,
        }
        impl crate::SessionObserver for Counter {
            fn on_reset(&mut self, _s: &LiftState, _q: &QueueStore) { self.resets += 1; }
            fn on_step(&mut self, _o: &StepOutcome, _q: &QueueStore) { self.steps += 1; }
            fn on_run_end(&mut self, s: Step) { self.ended = Some(s); }
        }

        let mut session = Session::new(busy_config(2)).unwrap();
        let mut counter = Counter::default();
        session.run_episode(&mut RandomPolicy, 250, &mut counter).unwrap();
        assert_eq!(counter.resets, 1);
        assert_eq!(counter.steps, 250);
        assert_eq!(counter.ended, Some(Step(250)));

        session.run_steps(&mut RandomPolicy, 10, &mut NoopObserver).unwrap();
        assert_eq!(session.clock(), Step(260));
    }

    #[test]
    fn illegal_policy_aborts_the_run() {
        struct AlwaysStop;
        impl Policy for AlwaysStop {
            fn choose(&mut self, _s: &LiftState, _l: ActionSet, _r: &mut SimRng) -> Action {
                Action::Stop
            }
        }

        let mut session = Session::new(quiet_config(4, 2)).unwrap();
        let err = session.run_steps(&mut AlwaysStop, 5, &mut NoopObserver).unwrap_err();
        assert!(err.is_invalid_action());
        assert_eq!(session.clock(), Step::ZERO);
    }

    #[test]
    fn idle_policy_never_moves() {
        let mut session = Session::new(busy_config(4)).unwrap();
        let start = session.state().floor;
        session.run_steps(&mut crate::IdlePolicy, 100, &mut NoopObserver).unwrap();
        assert_eq!(session.state().floor, start);
    }
}
