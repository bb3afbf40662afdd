//! The dispatch and motion scheduler for a single car.
//!
//! [`Elevator`] owns the [`CarState`] and is the only thing that changes it.
//! Two entry points feed it work:
//!
//! - [`Elevator::call_from`] serves hall calls nearest-first, asking the
//!   arrival observer at every stop whether someone boards.
//! - [`Elevator::pressed_floor_buttons`] serves destination calls in SCAN
//!   order (see [`crate::planner`]).
//!
//! Both run the whole batch before returning. Motion and door operations
//! are simulated with timed waits on the tokio clock; each wait races the
//! car's shutdown token, so cancelling it aborts the batch with
//! `Error::Interrupted` and leaves the car at the last floor it fully
//! reached.
//!
//! # Boarding
//!
//! ```text
//! call_from([3, 6])             car at 1, observer boards at 3 with [1]
//!
//!   1 ─▶ 2 ─▶ 3   open   AwaitingDecision ─▶ BoardingRedirect
//!                 close                     ServingDestinations
//!   3 ─▶ 2 ─▶ 1   open, close
//!                 (deferred hall call)      ServingHallCalls
//!   1 ─▶ … ─▶ 6   open   AwaitingDecision
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use elevator_core::{CarConfig, Direction, Error, Floor, Result, Timing, constants::DEFAULT_FLOOR};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::{
    events::{CarEvent, EventKind, Listeners},
    nearest::nearest_floor,
    observer::{ArrivalObserver, BoardingDecision},
    planner::visit_order,
    state::CarState,
    state_machine::{DispatchMachine, DispatchPhase},
};

/// A simulated elevator car and its scheduler.
pub struct Elevator {
    state: CarState,
    timing: Timing,
    listeners: Listeners,
    observer: Option<Box<dyn ArrivalObserver>>,
    machine: DispatchMachine,
    shutdown: CancellationToken,
}

impl Elevator {
    /// Create a car at the default floor.
    pub fn new(timing: Timing) -> Self {
        Self::starting_at(timing, DEFAULT_FLOOR)
    }

    /// Create a car at `floor`.
    pub fn starting_at(timing: Timing, floor: Floor) -> Self {
        Self {
            state: CarState::new(floor),
            timing,
            listeners: Listeners::new(),
            observer: None,
            machine: DispatchMachine::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Create a car from user configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration yields no valid timing.
    pub fn from_config(config: &CarConfig) -> Result<Self> {
        Ok(Self::starting_at(config.timing()?, config.initial_floor))
    }

    /// Use `token` to cancel in-flight batches.
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Token that aborts the running batch when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn state(&self) -> &CarState {
        &self.state
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn phase(&self) -> DispatchPhase {
        self.machine.current_phase()
    }

    pub fn dispatch_machine(&self) -> &DispatchMachine {
        &self.machine
    }

    /// Register a listener for one kind of event.
    pub fn on<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(Floor) + Send + 'static,
    {
        self.listeners.on(kind, listener);
    }

    /// Receive every event the car fires from now on.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<CarEvent> {
        self.listeners.subscribe()
    }

    pub fn set_arrival_observer<O>(&mut self, observer: O)
    where
        O: ArrivalObserver + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_arrival_observer(&mut self) {
        self.observer = None;
    }

    /// Serve hall calls from `floors`, nearest floor first.
    ///
    /// At every stop the door opens and the arrival observer, if any, is
    /// consulted. On [`BoardingDecision::Continue`] the door closes and the
    /// car heads to the next nearest floor. On [`BoardingDecision::Board`]
    /// the boarding passenger's destinations are served first; the hall
    /// calls not yet served are then re-submitted from the car's new
    /// position.
    ///
    /// An empty batch does nothing.
    ///
    /// # Errors
    ///
    /// Returns `Error::Interrupted` if the car is cancelled mid-batch.
    pub async fn call_from(&mut self, floors: impl IntoIterator<Item = Floor>) -> Result<()> {
        let pending: BTreeSet<Floor> = floors.into_iter().collect();
        if pending.is_empty() {
            debug!("Empty hall-call batch ignored");
            return Ok(());
        }

        info!(
            floor = self.state.current_floor(),
            calls = ?pending,
            "Serving hall calls"
        );
        let result = self.run_hall_calls(pending.into_iter().collect()).await;
        self.finish_batch(result)
    }

    /// Serve destination calls in SCAN order.
    ///
    /// The first floor in `floors` is the first-pressed one; when the car is
    /// between requests it decides which direction is served first. If the
    /// door is open it closes first. A request for the floor the car is
    /// already on is served in place, without moving.
    ///
    /// # Errors
    ///
    /// Returns `Error::Interrupted` if the car is cancelled mid-batch.
    pub async fn pressed_floor_buttons(
        &mut self,
        floors: impl IntoIterator<Item = Floor>,
    ) -> Result<()> {
        let floors: Vec<Floor> = floors.into_iter().collect();
        if floors.is_empty() && !self.state.is_door_open() {
            debug!("Empty destination batch ignored");
            return Ok(());
        }

        info!(
            floor = self.state.current_floor(),
            buttons = ?floors,
            "Serving destination calls"
        );
        let result = self.run_destinations(&floors).await;
        self.finish_batch(result)
    }

    async fn run_hall_calls(&mut self, mut pending: Vec<Floor>) -> Result<()> {
        self.machine.transition_to(DispatchPhase::ServingHallCalls)?;

        while !pending.is_empty() {
            let target = nearest_floor(self.state.current_floor(), &pending)?;
            pending.retain(|&floor| floor != target);

            self.move_to(target).await?;
            self.open_door().await?;
            self.machine.transition_to(DispatchPhase::ArrivedAtHallCall)?;

            match self.consult_observer(target)? {
                BoardingDecision::Continue => {
                    self.machine.transition_to(DispatchPhase::ServingHallCalls)?;
                    self.close_door().await?;
                }
                BoardingDecision::Board(destinations) => {
                    info!(
                        floor = target,
                        destinations = ?destinations,
                        deferred = ?pending,
                        "Passenger boarded, deferring remaining hall calls"
                    );
                    self.machine.transition_to(DispatchPhase::BoardingRedirect)?;
                    self.machine
                        .transition_to(DispatchPhase::ServingDestinations)?;
                    self.serve_destinations(&destinations).await?;
                    self.machine.finish_destinations()?;

                    if !pending.is_empty() {
                        debug!(deferred = ?pending, "Re-submitting deferred hall calls");
                    }
                }
            }
        }

        self.machine.transition_to(DispatchPhase::Idle)?;
        Ok(())
    }

    async fn run_destinations(&mut self, floors: &[Floor]) -> Result<()> {
        self.machine
            .transition_to(DispatchPhase::ServingDestinations)?;
        self.serve_destinations(floors).await?;
        self.machine.finish_destinations()?;
        Ok(())
    }

    /// Ask the observer what happens at a hall-call stop.
    ///
    /// Observer failures are logged and treated as no boarding.
    fn consult_observer(&mut self, floor: Floor) -> Result<BoardingDecision> {
        let Some(observer) = self.observer.as_mut() else {
            return Ok(BoardingDecision::Continue);
        };

        self.machine.transition_to(DispatchPhase::AwaitingDecision)?;
        match observer.on_arrival(floor) {
            Ok(decision) => Ok(decision),
            Err(e) => {
                warn!(floor, error = %e, "Arrival observer failed, continuing without boarding");
                Ok(BoardingDecision::Continue)
            }
        }
    }

    async fn serve_destinations(&mut self, floors: &[Floor]) -> Result<()> {
        let current = self.state.current_floor();
        let mut requested = floors.to_vec();
        requested.sort_unstable();
        requested.dedup();

        if self.state.is_door_open() {
            self.close_door().await?;
            requested.retain(|&floor| floor != current);
        } else if requested.binary_search(&current).is_ok() {
            self.open_door().await?;
            self.close_door().await?;
            requested.retain(|&floor| floor != current);
        }

        let Some(&first_pressed) = floors.first() else {
            return Ok(());
        };

        let order = visit_order(current, first_pressed, &requested);
        debug!(floor = current, order = ?order, "Destination visit order");

        for floor in order {
            self.move_to(floor).await?;
            self.open_door().await?;
            self.close_door().await?;
        }
        Ok(())
    }

    async fn move_to(&mut self, target: Floor) -> Result<()> {
        while let Some(direction) = Direction::between(self.state.current_floor(), target) {
            let floor = self.state.current_floor();
            self.emit(CarEvent::floor_passed(floor));
            pause(&self.shutdown, self.timing.per_floor, floor).await?;

            let next = direction.step(floor);
            self.state.set_floor(next);
            trace!(from = floor, to = next, %direction, "Car moved one floor");
        }
        Ok(())
    }

    async fn open_door(&mut self) -> Result<()> {
        let floor = self.state.current_floor();
        pause(&self.shutdown, self.timing.door_dwell, floor).await?;
        self.state.set_door_open(true);
        debug!(floor, "Door opened");
        self.emit(CarEvent::door_opened(floor));
        Ok(())
    }

    async fn close_door(&mut self) -> Result<()> {
        let floor = self.state.current_floor();
        pause(&self.shutdown, self.timing.door_dwell, floor).await?;
        self.state.set_door_open(false);
        debug!(floor, "Door closed");
        self.emit(CarEvent::door_closed(floor));
        Ok(())
    }

    fn emit(&mut self, event: CarEvent) {
        self.listeners.dispatch(event);
    }

    fn finish_batch(&mut self, result: Result<()>) -> Result<()> {
        if let Err(e) = &result {
            error!(
                floor = self.state.current_floor(),
                phase = %self.machine.current_phase(),
                error = %e,
                "Batch aborted"
            );
            self.machine.reset();
        }
        result
    }
}

/// Wait for `duration` unless `shutdown` fires first.
async fn pause(shutdown: &CancellationToken, duration: Duration, floor: Floor) -> Result<()> {
    if duration.is_zero() {
        return if shutdown.is_cancelled() {
            Err(Error::Interrupted { floor })
        } else {
            Ok(())
        };
    }

    tokio::select! {
        biased;
        () = shutdown.cancelled() => Err(Error::Interrupted { floor }),
        () = tokio::time::sleep(duration) => Ok(()),
    }
}

impl fmt::Debug for Elevator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Elevator")
            .field("state", &self.state)
            .field("timing", &self.timing)
            .field("phase", &self.machine.current_phase())
            .field("listeners", &self.listeners)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
