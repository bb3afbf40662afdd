//! Long-lived worker task owning an [`Elevator`].
//!
//! The car runs on its own task and idles until a request arrives. Callers
//! hold a cloneable [`ServiceHandle`], submit hall calls or destination calls
//! over a channel and wait for the batch to complete.
//!
//! ```text
//! ┌──────────────┐  Request   ┌──────────────────┐
//! │ ServiceHandle│──────────►│  service task     │
//! │  (clones)    │◄──────────│  owns Elevator    │
//! └──────────────┘  Result   └──────────────────┘
//! ```
//!
//! Requests are served strictly one at a time, in arrival order.
//!
//! # Examples
//!
//! ```
//! use elevator_car::{Elevator, ElevatorService};
//! use elevator_core::Timing;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> elevator_core::Result<()> {
//! let service = ElevatorService::spawn(Elevator::new(Timing::instant()));
//! let handle = service.handle();
//!
//! handle.call_from(vec![4]).await?;
//! handle.pressed_floor_buttons(vec![2]).await?;
//!
//! let elevator = service.shutdown().await?;
//! assert_eq!(elevator.state().current_floor(), 2);
//! # Ok(())
//! # }
//! ```

use elevator_core::{Error, Floor, RequestKind, Result, constants::SERVICE_QUEUE_CAPACITY};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::elevator::Elevator;

/// A batch submitted to the service task.
#[derive(Debug)]
struct Request {
    kind: RequestKind,
    floors: Vec<Floor>,
    reply: oneshot::Sender<Result<()>>,
}

/// Cloneable handle for submitting work to a running service.
#[derive(Debug, Clone)]
pub struct ServiceHandle {
    requests: mpsc::Sender<Request>,
    shutdown: CancellationToken,
}

impl ServiceHandle {
    /// Submit hall calls and wait until they are served.
    ///
    /// # Errors
    ///
    /// Returns `Error::ServiceUnavailable` if the service has stopped, or
    /// the batch error if the car was interrupted.
    pub async fn call_from(&self, floors: Vec<Floor>) -> Result<()> {
        self.submit(RequestKind::HallCall, floors).await
    }

    /// Submit destination calls and wait until they are served.
    ///
    /// # Errors
    ///
    /// Same as [`ServiceHandle::call_from`].
    pub async fn pressed_floor_buttons(&self, floors: Vec<Floor>) -> Result<()> {
        self.submit(RequestKind::DestinationCall, floors).await
    }

    /// Submit a batch of either kind and wait for its outcome.
    ///
    /// # Errors
    ///
    /// Same as [`ServiceHandle::call_from`].
    pub async fn submit(&self, kind: RequestKind, floors: Vec<Floor>) -> Result<()> {
        let (reply, outcome) = oneshot::channel();
        self.requests
            .send(Request {
                kind,
                floors,
                reply,
            })
            .await
            .map_err(|_| Error::ServiceUnavailable)?;

        outcome.await.map_err(|_| Error::ServiceUnavailable)?
    }

    /// Cancel the car. The running batch, if any, fails with
    /// `Error::Interrupted` and the service task stops.
    pub fn cancel(&self) {
        self.shutdown.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.requests.is_closed() && !self.shutdown.is_cancelled()
    }
}

/// A spawned elevator service.
#[derive(Debug)]
pub struct ElevatorService {
    handle: ServiceHandle,
    task: JoinHandle<Elevator>,
}

impl ElevatorService {
    /// Move `elevator` onto its own task and start serving requests.
    ///
    /// The service stops when the elevator's shutdown token is cancelled or
    /// when every handle has been dropped.
    pub fn spawn(elevator: Elevator) -> Self {
        let (requests, inbox) = mpsc::channel(SERVICE_QUEUE_CAPACITY);
        let shutdown = elevator.shutdown_token();

        let task = tokio::spawn(run(elevator, inbox, shutdown.clone()));

        Self {
            handle: ServiceHandle { requests, shutdown },
            task,
        }
    }

    pub fn handle(&self) -> ServiceHandle {
        self.handle.clone()
    }

    /// Cancel the car, wait for the task to stop and hand the car back.
    ///
    /// The returned car keeps its cancelled token; further batches on it
    /// fail with `Error::Interrupted`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ServiceUnavailable` if the task panicked.
    pub async fn shutdown(self) -> Result<Elevator> {
        self.handle.cancel();
        drop(self.handle);
        self.task.await.map_err(|e| {
            warn!(error = %e, "Elevator service task did not stop cleanly");
            Error::ServiceUnavailable
        })
    }
}

async fn run(
    mut elevator: Elevator,
    mut inbox: mpsc::Receiver<Request>,
    shutdown: CancellationToken,
) -> Elevator {
    info!(floor = elevator.state().current_floor(), "Elevator service started");

    loop {
        tokio::select! {
            biased;
            () = shutdown.cancelled() => break,
            request = inbox.recv() => {
                let Some(request) = request else { break };
                serve(&mut elevator, request).await;
            }
        }
    }

    info!(floor = elevator.state().current_floor(), "Elevator service stopped");
    elevator
}

async fn serve(elevator: &mut Elevator, request: Request) {
    debug!(kind = %request.kind, floors = ?request.floors, "Request received");

    let outcome = match request.kind {
        RequestKind::HallCall => elevator.call_from(request.floors).await,
        RequestKind::DestinationCall => elevator.pressed_floor_buttons(request.floors).await,
    };

    if request.reply.send(outcome).is_err() {
        debug!("Requester went away before the batch finished");
    }
}
