//! The `QueueStore`: waiting passengers per floor plus the cabin.
//!
//! The store is the source of truth for both button panels: a call button is
//! lit iff its floor queue is non-empty and a cabin button is lit iff some
//! boarded passenger is headed there.  See [`QueueStore::call_panel`] and
//! [`QueueStore::cabin_panel`].

use std::collections::VecDeque;

use lift_core::{ButtonPanel, Floor, PassengerId, Step};

use crate::Passenger;

/// Holds every passenger of one session.
///
/// `floors` is indexed by `Floor` and always has one FIFO queue per floor.
/// The cabin keeps boarding order.
pub struct QueueStore {
    floors:  Vec<VecDeque<Passenger>>,
    cabin:   Vec<Passenger>,
    /// Next id to hand out; also the number of passengers spawned since `clear`.
    next_id: u32,
}

impl QueueStore {
    /// An empty store for a shaft of `floors` floors.
    pub fn new(floors: usize) -> Self {
        Self {
            floors:  (0..floors).map(|_| VecDeque::new()).collect(),
            cabin:   Vec::new(),
            next_id: 0,
        }
    }

    /// Drop every passenger and restart id numbering.
    pub fn clear(&mut self) {
        self.floors.iter_mut().for_each(VecDeque::clear);
        self.cabin.clear();
        self.next_id = 0;
    }

    #[inline]
    pub fn floors(&self) -> usize {
        self.floors.len()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Create a passenger waiting at `start` and append it to that floor's queue.
    ///
    /// # Panics
    /// Panics if `start` is outside the shaft.
    pub fn spawn(&mut self, start: Floor, destination: Floor, at: Step) -> PassengerId {
        let id = PassengerId(self.next_id);
        self.next_id += 1;
        self.floors[start.index()].push_back(Passenger::new(id, start, destination, at));
        id
    }

    /// Board waiting passengers at `floor`, earliest arrival first, while the
    /// cabin holds fewer than `capacity_limit`.  Returns how many boarded.
    ///
    /// A cabin already at or above the limit boards nobody; it is never
    /// shrunk here.
    pub fn admit(&mut self, floor: Floor, capacity_limit: usize) -> usize {
        let queue = &mut self.floors[floor.index()];
        let mut moved = 0;
        while self.cabin.len() < capacity_limit {
            let Some(p) = queue.pop_front() else { break };
            self.cabin.push(p);
            moved += 1;
        }
        moved
    }

    /// Remove every cabin passenger whose destination is `floor` and return
    /// them.  The remaining passengers keep their boarding order.
    pub fn disembark(&mut self, floor: Floor) -> Vec<Passenger> {
        if !self.cabin.iter().any(|p| p.destination() == floor) {
            return Vec::new();
        }
        let (leaving, staying): (Vec<_>, Vec<_>) = std::mem::take(&mut self.cabin)
            .into_iter()
            .partition(|p| p.destination() == floor);
        self.cabin = staying;
        leaving
    }

    // ── Read-only views ───────────────────────────────────────────────────

    /// Cabin size plus everyone waiting on any floor.
    pub fn active_count(&self) -> usize {
        self.cabin.len() + self.waiting_count()
    }

    /// Everyone waiting on any floor.
    pub fn waiting_count(&self) -> usize {
        self.floors.iter().map(VecDeque::len).sum()
    }

    /// Passengers waiting at `floor`, head of the queue first.
    pub fn waiting(&self, floor: Floor) -> impl ExactSizeIterator<Item = &Passenger> + '_ {
        self.floors[floor.index()].iter()
    }

    #[inline]
    pub fn waiting_at(&self, floor: Floor) -> usize {
        self.floors[floor.index()].len()
    }

    /// Boarded passengers in boarding order.
    #[inline]
    pub fn cabin(&self) -> &[Passenger] {
        &self.cabin
    }

    #[inline]
    pub fn cabin_len(&self) -> usize {
        self.cabin.len()
    }

    /// Passengers spawned since the last `clear`.
    #[inline]
    pub fn spawned_total(&self) -> u32 {
        self.next_id
    }

    /// Call buttons derived from the floor queues.
    pub fn call_panel(&self) -> ButtonPanel {
        ButtonPanel::from_fn(self.floors(), |f| !self.floors[f.index()].is_empty())
    }

    /// Cabin buttons derived from the boarded passengers' destinations.
    pub fn cabin_panel(&self) -> ButtonPanel {
        let mut panel = ButtonPanel::empty(self.floors());
        for p in &self.cabin {
            panel.press(p.destination());
        }
        panel
    }
}
