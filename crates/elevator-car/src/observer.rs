//! Arrival observer: decides what happens when the car stops for a hall call.
//!
//! When the door opens on a floor the car was called to, the scheduler asks
//! the observer whether a passenger boards. The observer answers with a
//! [`BoardingDecision`] instead of driving the car itself, so the scheduler
//! stays in charge of ordering: boarding destinations are served first and
//! the remaining hall calls are re-submitted afterwards.

use elevator_core::{Floor, Result};

/// Outcome of a hall-call stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardingDecision {
    /// Nobody boards; close the door and keep serving hall calls.
    Continue,

    /// A passenger boarded and pressed these floor buttons.
    Board(Vec<Floor>),
}

/// Consulted each time the car opens its door at a hall-call floor.
///
/// Any `FnMut(Floor) -> Result<BoardingDecision>` closure is an observer.
///
/// # Errors
///
/// An observer may fail (for example when its input source is closed). The
/// scheduler logs the failure and treats it as [`BoardingDecision::Continue`].
///
/// # Examples
///
/// ```
/// use elevator_car::{ArrivalObserver, BoardingDecision};
///
/// let mut observer = |floor: i32| -> elevator_core::Result<BoardingDecision> {
///     Ok(if floor == 3 {
///         BoardingDecision::Board(vec![1])
///     } else {
///         BoardingDecision::Continue
///     })
/// };
///
/// assert_eq!(observer.on_arrival(3).unwrap(), BoardingDecision::Board(vec![1]));
/// assert_eq!(observer.on_arrival(4).unwrap(), BoardingDecision::Continue);
/// ```
pub trait ArrivalObserver: Send {
    fn on_arrival(&mut self, floor: Floor) -> Result<BoardingDecision>;
}

impl<F> ArrivalObserver for F
where
    F: FnMut(Floor) -> Result<BoardingDecision> + Send,
{
    fn on_arrival(&mut self, floor: Floor) -> Result<BoardingDecision> {
        self(floor)
    }
}
