//! A single transport request.

use lift_core::{Floor, PassengerId, Step};

/// Someone who wants to travel from `start` to `destination`.
///
/// Passengers are created only by [`QueueStore::spawn`](crate::QueueStore::spawn)
/// and are immutable afterwards.  The type is not `Clone`: a
/// passenger is in exactly one queue, or has been handed back by
/// `disembark`.
#[derive(Debug, PartialEq, Eq)]
pub struct Passenger {
    id:          PassengerId,
    start:       Floor,
    destination: Floor,
    spawned_at:  Step,
}

impl Passenger {
    pub(crate) fn new(id: PassengerId, start: Floor, destination: Floor, spawned_at: Step) -> Self {
        Self { id, start, destination, spawned_at }
    }

    #[inline]
    pub fn id(&self) -> PassengerId {
        self.id
    }

    #[inline]
    pub fn start(&self) -> Floor {
        self.start
    }

    #[inline]
    pub fn destination(&self) -> Floor {
        self.destination
    }

    /// Steps completed in the episode when this passenger appeared.
    #[inline]
    pub fn spawned_at(&self) -> Step {
        self.spawned_at
    }
}
