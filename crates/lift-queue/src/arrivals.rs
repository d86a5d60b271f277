//! Stochastic passenger arrivals.
//!
//! Each call performs one independent Bernoulli trial per ordered floor pair
//! `(i, j)` with success probability `P[i][j]`.  Every success spawns one
//! passenger at floor `i` bound for `j`; several successes in the same call
//! all spawn.  Pairs are visited in row-major order so a seeded run is
//! reproducible.

use lift_core::{ArrivalMatrix, PassengerId, SimRng, Step};
use log::trace;

use crate::QueueStore;

/// Generates new passengers from a fixed arrival-probability matrix.
#[derive(Clone, Debug)]
pub struct ArrivalModel {
    matrix: ArrivalMatrix,
}

impl ArrivalModel {
    pub fn new(matrix: ArrivalMatrix) -> Self {
        Self { matrix }
    }

    /// Draw one step of arrivals into `queues` and return the new ids.
    ///
    /// An empty result means nobody arrived this call.  `queues` must cover
    /// the same number of floors as the matrix.
    pub fn spawn(&self, queues: &mut QueueStore, rng: &mut SimRng, at: Step) -> Vec<PassengerId> {
        debug_assert_eq!(queues.floors(), self.matrix.floors());

        let mut spawned = Vec::new();
        for (start, destination, p) in self.matrix.pairs() {
            if p > 0.0 && rng.arrives(p) {
                let id = queues.spawn(start, destination, at);
                trace!("{at}: {id} arrives at floor {start} for floor {destination}");
                spawned.push(id);
            }
        }
        spawned
    }
}
