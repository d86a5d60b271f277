//! `lift-queue`: where passengers live between arrival and delivery.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`passenger`] | `Passenger`, an immutable request (start → destination)  |
//! | [`store`]     | `QueueStore`: per-floor FIFO queues plus the cabin       |
//! | [`arrivals`]  | `ArrivalModel`: one Bernoulli draw per floor pair        |
//!
//! A passenger is owned by exactly one queue at a time.  Boarding moves it
//! from a floor queue to the cabin; disembarking moves it out of the store
//! and hands it to the caller.

pub mod arrivals;
pub mod passenger;
pub mod store;


pub use arrivals::ArrivalModel;
pub use passenger::Passenger;
pub use store::QueueStore;
