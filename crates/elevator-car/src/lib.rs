//! Single-car elevator simulation.
//!
//! This crate contains the dispatch and motion scheduler for one elevator
//! car: the [`Elevator`] serves hall calls nearest-first and destination
//! calls in SCAN order, moves floor by floor on simulated time and fires
//! [`CarEvent`]s to registered listeners.
//!
//! # Example
//!
//! ```
//! use elevator_car::{Elevator, EventKind};
//! use elevator_core::Timing;
//! use std::sync::{Arc, Mutex};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> elevator_core::Result<()> {
//! let mut elevator = Elevator::new(Timing::instant());
//!
//! let passed = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&passed);
//! elevator.on(EventKind::FloorPassed, move |floor| sink.lock().unwrap().push(floor));
//!
//! elevator.pressed_floor_buttons(vec![2, 5, 2]).await?;
//!
//! assert_eq!(*passed.lock().unwrap(), vec![1, 2, 3, 4]);
//! assert_eq!(elevator.state().current_floor(), 5);
//! # Ok(())
//! # }
//! ```

pub mod elevator;
pub mod events;
pub mod nearest;
pub mod observer;
pub mod planner;
pub mod service;
pub mod state;
pub mod state_machine;

pub use elevator::Elevator;
pub use events::{CarEvent, EventKind, Listeners};
pub use nearest::nearest_floor;
pub use observer::{ArrivalObserver, BoardingDecision};
pub use planner::visit_order;
pub use service::{ElevatorService, ServiceHandle};
pub use state::CarState;
pub use state_machine::{DispatchMachine, DispatchPhase, PhaseTransition};
