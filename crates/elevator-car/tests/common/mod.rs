//! Shared helpers for scheduler integration tests.

#![allow(dead_code)]

use elevator_car::{CarEvent, Elevator, EventKind};
use elevator_core::{Floor, Timing};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// Fast car for scheduler tests: 2 m floors at 20 m/s and
/// a one second door.
pub fn test_timing() -> Timing {
    Timing::new(Duration::from_millis(100), Duration::from_secs(1))
}

/// A car at `floor` plus a receiver for everything it fires.
pub fn car_at(floor: Floor) -> (Elevator, EventLog) {
    let mut elevator = Elevator::starting_at(test_timing(), floor);
    let log = EventLog::new(elevator.subscribe());
    (elevator, log)
}

/// Collects events fired by a car.
pub struct EventLog {
    rx: UnboundedReceiver<CarEvent>,
    seen: Vec<CarEvent>,
}

impl EventLog {
    pub fn new(rx: UnboundedReceiver<CarEvent>) -> Self {
        Self {
            rx,
            seen: Vec::new(),
        }
    }

    /// Pull in everything fired so far and return the full log.
    pub fn events(&mut self) -> &[CarEvent] {
        while let Ok(event) = self.rx.try_recv() {
            self.seen.push(event);
        }
        &self.seen
    }

    /// Floors of every event of `kind`, in firing order.
    pub fn floors(&mut self, kind: EventKind) -> Vec<Floor> {
        self.events()
            .iter()
            .filter(|event| event.kind == kind)
            .map(|event| event.floor)
            .collect()
    }

    pub fn passed(&mut self) -> Vec<Floor> {
        self.floors(EventKind::FloorPassed)
    }

    pub fn opened(&mut self) -> Vec<Floor> {
        self.floors(EventKind::DoorOpened)
    }

    pub fn closed(&mut self) -> Vec<Floor> {
        self.floors(EventKind::DoorClosed)
    }

    /// Forget everything collected so far.
    pub fn clear(&mut self) {
        self.events();
        self.seen.clear();
    }
}
