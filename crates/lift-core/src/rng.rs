//! The session's random source.
//!
//! Every draw a lift episode makes comes from here: the start floor, the
//! size of the reset backlog, one Bernoulli trial per arrival pair, and the
//! separate stream handed to policies.  Nothing reads ambient global random
//! state, so a fixed seed reproduces a run exactly and independent sessions
//! never interfere.

use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use rand::{Rng, RngCore, SeedableRng};

use crate::{Action, ActionSet, Floor};

/// Salt separating the policy stream from the arrival stream (ASCII "policy").
const POLICY_SALT: u64 = 0x0000_706f_6c69_6379;

/// Seeded RNG owned by one session.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Split off the stream policies draw from.
    ///
    /// Consumes one draw from `self`, so it must happen at the same point of
    /// every run for the arrival sequence to stay reproducible.
    pub fn policy_stream(&mut self) -> SimRng {
        SimRng(SmallRng::seed_from_u64(self.0.next_u64() ^ POLICY_SALT))
    }

    /// Start floor for a new episode, uniform over a shaft of `floors` floors.
    ///
    /// # Panics
    /// Panics if `floors` is zero.
    pub fn initial_floor(&mut self, floors: usize) -> Floor {
        Floor(self.0.gen_range(0..floors) as u8)
    }

    /// Reset backlog head count, uniform in `0..max_target`.
    pub fn backlog_target(&mut self, max_target: usize) -> usize {
        if max_target == 0 { 0 } else { self.0.gen_range(0..max_target) }
    }

    /// One arrival trial: `true` with probability `p`, clamped to [0, 1].
    #[inline]
    pub fn arrives(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// A uniformly chosen member of `legal`; `None` for the empty set.
    pub fn pick_action(&mut self, legal: ActionSet) -> Option<Action> {
        legal.iter().choose(&mut self.0)
    }
}
