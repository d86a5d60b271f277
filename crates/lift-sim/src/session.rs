//! The `Session` struct and its reset/step lifecycle.

use lift_core::{
    Action, ActionSet, ButtonPanel, Direction, DoorState, Floor, LiftConfig, LiftState,
    PassengerId, SimRng, Step, legal_actions,
};
use lift_queue::{ArrivalModel, Passenger, QueueStore};
use log::{debug, trace};

use crate::{Policy, SessionBuilder, SessionObserver, SimResult, transition};

// ── StepOutcome ───────────────────────────────────────────────────────────────

/// Everything that happened during one step.
///
/// Reward functions live outside the simulator; they typically need
/// `(state, action, next, active_before, active_after)`.  Passenger counts
/// obey `active_after == active_before - delivered.len() + spawned.len()`.
#[derive(Debug)]
pub struct StepOutcome {
    /// Steps completed since reset, this one included.
    pub step:          Step,
    pub state:         LiftState,
    pub action:        Action,
    pub next:          LiftState,
    pub active_before: usize,
    pub active_after:  usize,
    pub boarded:       usize,
    pub delivered:     Vec<Passenger>,
    /// Passengers that arrived after `next` was computed.  They are in the
    /// floor queues but do not light a call button until the next step.
    pub spawned:       Vec<PassengerId>,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// One lift, its passengers, and its randomness.
///
/// A session is driven by exactly one caller: `reset`, then any number of
/// `step`s with actions taken from `legal_actions`.  Sessions share nothing,
/// so independent runs can live on separate threads.
///
/// Create via [`Session::new`] or [`SessionBuilder`].
pub struct Session {
    pub(crate) config:      LiftConfig,
    pub(crate) arrivals:    ArrivalModel,
    pub(crate) queues:      QueueStore,
    pub(crate) rng:         SimRng,
    pub(crate) policy_rng:  SimRng,
    pub(crate) state:       LiftState,
    pub(crate) clock:       Step,
    /// Fixed reset floor; `None` draws it uniformly.
    pub(crate) start_floor: Option<Floor>,
    /// Fixed reset passengers `(start, destination)`; `None` draws a backlog.
    pub(crate) script:      Option<Vec<(Floor, Floor)>>,
}

impl Session {
    /// Validate `config` and return a session that has already been reset.
    pub fn new(config: LiftConfig) -> SimResult<Self> {
        SessionBuilder::new(config).build()
    }

    pub(crate) fn assemble(
        config:      LiftConfig,
        start_floor: Option<Floor>,
        script:      Option<Vec<(Floor, Floor)>>,
    ) -> Self {
        let floors = config.floors();
        let mut rng = SimRng::new(config.seed);
        let policy_rng = rng.policy_stream();
        let mut session = Self {
            arrivals: ArrivalModel::new(config.arrivals.clone()),
            queues: QueueStore::new(floors),
            rng,
            policy_rng,
            state: LiftState {
                floor:         Floor::GROUND,
                direction:     Direction::None,
                door:          DoorState::Closed,
                cabin_buttons: ButtonPanel::empty(floors),
                call_buttons:  ButtonPanel::empty(floors),
            },
            clock: Step::ZERO,
            config,
            start_floor,
            script,
        };
        session.reset();
        session
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Start a new episode and return its initial state.
    ///
    /// Empties both queues, picks the start floor, seeds a passenger
    /// backlog, and boards everyone waiting at the start floor.  That one
    /// boarding ignores `max_capacity`; any overflow is carried until the
    /// passengers get out.
    ///
    /// The RNG is not reseeded, so successive resets draw fresh episodes
    /// from the same reproducible stream.
    pub fn reset(&mut self) -> LiftState {
        self.queues.clear();
        self.clock = Step::ZERO;

        let floors = self.config.floors();
        let floor = match self.start_floor {
            Some(f) => f,
            None => self.rng.initial_floor(floors),
        };

        match &self.script {
            Some(script) => {
                for &(start, destination) in script {
                    self.queues.spawn(start, destination, Step::ZERO);
                }
            }
            None => self.draw_backlog(),
        }

        self.queues.admit(floor, usize::MAX);

        self.state = LiftState {
            floor,
            direction:     Direction::None,
            door:          DoorState::Closed,
            cabin_buttons: self.queues.cabin_panel(),
            call_buttons:  self.queues.call_panel(),
        };
        debug!(
            "reset: floor {floor}, {} in cabin, {} waiting",
            self.queues.cabin_len(),
            self.queues.waiting_count()
        );
        self.state
    }

    /// Call the arrival model until a random target head count is reached
    /// or the attempt budget runs out, whichever comes first.
    fn draw_backlog(&mut self) {
        let backlog = self.config.backlog;
        let target = self.rng.backlog_target(backlog.max_target);

        let mut attempts = 0;
        while self.queues.active_count() < target && attempts < backlog.max_attempts {
            attempts += 1;
            self.arrivals.spawn(&mut self.queues, &mut self.rng, Step::ZERO);
        }

        if self.queues.active_count() < target {
            debug!(
                "reset backlog: {} of {target} passengers after {attempts} attempts",
                self.queues.active_count()
            );
        }
    }

    /// Apply `action` and return the next state.
    ///
    /// # Errors
    /// `InvalidAction` if `action` is not in [`legal_actions`](Self::legal_actions).
    /// Nothing changes in that case.
    pub fn step(&mut self, action: Action) -> SimResult<LiftState> {
        self.advance(action).map(|outcome| outcome.next)
    }

    /// Like [`step`](Self::step) but returns the full [`StepOutcome`].
    pub fn advance(&mut self, action: Action) -> SimResult<StepOutcome> {
        let state = self.state;
        let active_before = self.queues.active_count();

        let t = transition(&state, action, &mut self.queues, self.config.max_capacity)?;
        self.state = t.next;
        self.clock.advance();

        // Arrivals go in after the state is final.
        let spawned = self.arrivals.spawn(&mut self.queues, &mut self.rng, self.clock);

        trace!(
            "{}: {action} {state} -> {} (+{} -{} boarded {})",
            self.clock,
            self.state,
            spawned.len(),
            t.delivered.len(),
            t.boarded
        );

        Ok(StepOutcome {
            step: self.clock,
            state,
            action,
            next: t.next,
            active_before,
            active_after: self.queues.active_count(),
            boarded: t.boarded,
            delivered: t.delivered,
            spawned,
        })
    }

    /// Reset, notify `observer`, and run `steps` policy-driven steps.
    pub fn run_episode<P: Policy, O: SessionObserver>(
        &mut self,
        policy:   &mut P,
        steps:    u64,
        observer: &mut O,
    ) -> SimResult<()> {
        let state = self.reset();
        observer.on_reset(&state, &self.queues);
        self.run_steps(policy, steps, observer)?;
        observer.on_run_end(self.clock);
        Ok(())
    }

    /// Run exactly `n` policy-driven steps from the current state.
    ///
    /// Stops at the first illegal action the policy returns.
    pub fn run_steps<P: Policy, O: SessionObserver>(
        &mut self,
        policy:   &mut P,
        n:        u64,
        observer: &mut O,
    ) -> SimResult<()> {
        for _ in 0..n {
            let legal = legal_actions(&self.state);
            let action = policy.choose(&self.state, legal, &mut self.policy_rng);
            let outcome = self.advance(action)?;
            observer.on_step(&outcome, &self.queues);
        }
        Ok(())
    }

    /// Restart every random stream from `seed`.  Takes effect from the next
    /// draw; call [`reset`](Self::reset) for a fresh episode.
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = SimRng::new(seed);
        self.policy_rng = self.rng.policy_stream();
    }

    // ── Read-only views ───────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> &LiftState {
        &self.state
    }

    /// Legal actions in the current state.
    #[inline]
    pub fn legal_actions(&self) -> ActionSet {
        legal_actions(&self.state)
    }

    /// Passengers in the cabin plus everyone waiting.  Telemetry only.
    #[inline]
    pub fn active_passenger_count(&self) -> usize {
        self.queues.active_count()
    }

    #[inline]
    pub fn queues(&self) -> &QueueStore {
        &self.queues
    }

    #[inline]
    pub fn config(&self) -> &LiftConfig {
        &self.config
    }

    /// Steps completed since the last reset.
    #[inline]
    pub fn clock(&self) -> Step {
        self.clock
    }

    #[inline]
    pub fn floors(&self) -> usize {
        self.config.floors()
    }
}
