//! Car events and the listener registry that delivers them.
//!
//! Every motion step and door operation produces a [`CarEvent`]. Events are
//! delivered synchronously, on the scheduler's own timeline, to every
//! listener registered for that kind, in registration order. Listeners
//! receive the floor number by value and have no handle to the car, so
//! they cannot change its state.
//!
//! # Examples
//!
//! ```
//! use elevator_car::{CarEvent, EventKind, Listeners};
//!
//! let mut listeners = Listeners::new();
//! let mut rx = listeners.subscribe();
//! listeners.on(EventKind::DoorOpened, |floor| println!("door opened on {floor}"));
//!
//! listeners.dispatch(CarEvent::door_opened(3));
//!
//! assert_eq!(rx.try_recv().unwrap(), CarEvent::door_opened(3));
//! ```

use elevator_core::Floor;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;

/// Kind of car event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The car is departing or passing this floor.
    FloorPassed,

    /// The door finished opening on this floor.
    DoorOpened,

    /// The door finished closing on this floor.
    DoorClosed,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FloorPassed => write!(f, "floor passed"),
            Self::DoorOpened => write!(f, "door opened"),
            Self::DoorClosed => write!(f, "door closed"),
        }
    }
}

/// A single notification from the car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CarEvent {
    pub kind: EventKind,
    pub floor: Floor,
}

impl CarEvent {
    pub fn floor_passed(floor: Floor) -> Self {
        Self {
            kind: EventKind::FloorPassed,
            floor,
        }
    }

    pub fn door_opened(floor: Floor) -> Self {
        Self {
            kind: EventKind::DoorOpened,
            floor,
        }
    }

    pub fn door_closed(floor: Floor) -> Self {
        Self {
            kind: EventKind::DoorClosed,
            floor,
        }
    }
}

impl fmt::Display for CarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on floor {}", self.kind, self.floor)
    }
}

type Callback = Box<dyn FnMut(CarEvent) + Send>;

struct Subscription {
    /// `None` receives every kind.
    kind: Option<EventKind>,
    callback: Callback,
}

/// Ordered set of event subscriptions.
#[derive(Default)]
pub struct Listeners {
    subscriptions: Vec<Subscription>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one kind of event.
    pub fn on<F>(&mut self, kind: EventKind, mut listener: F)
    where
        F: FnMut(Floor) + Send + 'static,
    {
        self.subscriptions.push(Subscription {
            kind: Some(kind),
            callback: Box::new(move |event| listener(event.floor)),
        });
    }

    /// Register a channel that receives every event.
    ///
    /// Events sent after the receiver is dropped are discarded.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<CarEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscriptions.push(Subscription {
            kind: None,
            callback: Box::new(move |event| {
                let _ = tx.send(event);
            }),
        });
        rx
    }

    /// Deliver an event to matching listeners in registration order.
    pub fn dispatch(&mut self, event: CarEvent) {
        for subscription in &mut self.subscriptions {
            if subscription.kind.is_none_or(|kind| kind == event.kind) {
                (subscription.callback)(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}
