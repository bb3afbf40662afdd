//! Line-oriented console I/O.
//!
//! Standard input is read on a dedicated thread and forwarded over a
//! channel, so the menu loop can await lines asynchronously while the
//! boarding prompt, which runs synchronously inside the scheduler, can
//! still block for an answer. Both paths give up when the shutdown token
//! is cancelled.

use std::io::{BufRead, Write};
use std::sync::Arc;

use elevator_car::{BoardingDecision, CarEvent, EventKind};
use elevator_core::{Error, Floor, Result};
use tokio::runtime::Handle;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const MENU_PROMPT: &str =
    "Enter c to call elevator or g to go to floors if you are inside or q to quit";
pub const CALL_PROMPT: &str =
    "Enter floor numbers from where elevator is called separated with a space then press Enter key";
pub const GO_PROMPT: &str =
    "Enter floor numbers where elevator will go separated with a space then press Enter key";
pub const BOARD_PROMPT: &str = "Enter y if you want to get in elevator or n to make elevator continue its tour, default is n";
pub const INPUT_ERROR: &str = "Unable to get any floors, try once more time";

/// A menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CallCar,
    GoToFloors,
    Quit,
    Unknown,
}

impl Action {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "c" => Action::CallCar,
            "g" => Action::GoToFloors,
            "q" => Action::Quit,
            _ => Action::Unknown,
        }
    }
}

/// Parse space-separated floor numbers.
///
/// Returns `None` if the line is blank or any token is not an integer.
pub fn parse_floors(line: &str) -> Option<Vec<Floor>> {
    let floors = line
        .split_whitespace()
        .map(str::parse)
        .collect::<std::result::Result<Vec<Floor>, _>>()
        .ok()?;

    (!floors.is_empty()).then_some(floors)
}

/// Render an event the way the console prints it.
pub fn render(event: &CarEvent, json: bool) -> String {
    if json {
        return serde_json::to_string(event).unwrap_or_else(|_| event.to_string());
    }
    match event.kind {
        EventKind::FloorPassed => format!("Passing floor {}", event.floor),
        EventKind::DoorOpened => format!("Door opened on floor {}", event.floor),
        EventKind::DoorClosed => format!("Door closed on floor {}", event.floor),
    }
}

/// Send each line of `reader` to `tx` until input ends or the receiver
/// goes away.
///
/// # Errors
///
/// Returns `Error::Io` if reading fails, including on invalid UTF-8.
pub fn forward_lines(reader: impl BufRead, tx: &mpsc::UnboundedSender<String>) -> Result<()> {
    for line in reader.lines() {
        if tx.send(line?).is_err() {
            break;
        }
    }
    Ok(())
}

/// Shared source of input lines.
#[derive(Debug, Clone)]
pub struct Console {
    lines: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
    shutdown: CancellationToken,
}

impl Console {
    /// Console reading lines from standard input.
    pub fn stdin(shutdown: CancellationToken) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || match forward_lines(std::io::stdin().lock(), &tx) {
            Ok(()) => debug!("Standard input closed"),
            Err(e) => warn!(error = %e, "Failed to read standard input"),
        });

        Self::from_receiver(rx, shutdown)
    }

    pub fn from_receiver(rx: mpsc::UnboundedReceiver<String>, shutdown: CancellationToken) -> Self {
        Self {
            lines: Arc::new(Mutex::new(rx)),
            shutdown,
        }
    }

    /// Print `message` and wait for the next line.
    ///
    /// Returns `None` once input is closed or the console is shut down.
    pub async fn prompt(&self, message: &str) -> Option<String> {
        println!("{message}");
        let _ = std::io::stdout().flush();

        tokio::select! {
            biased;
            () = self.shutdown.cancelled() => None,
            line = async { self.lines.lock().await.recv().await } => line,
        }
    }

    /// Prompt until the user enters at least one valid floor.
    pub async fn read_floors(&self, message: &str) -> Option<Vec<Floor>> {
        loop {
            let line = self.prompt(message).await?;
            match parse_floors(&line) {
                Some(floors) => return Some(floors),
                None => println!("{INPUT_ERROR}"),
            }
        }
    }

    /// Ask whether a passenger boards at `floor`, blocking the calling
    /// worker thread.
    ///
    /// Must run on a multi-threaded runtime.
    ///
    /// # Errors
    ///
    /// Returns `Error::Observer` if input closes before an answer arrives.
    pub fn ask_boarding(&self, floor: Floor) -> Result<BoardingDecision> {
        tokio::task::block_in_place(|| Handle::current().block_on(self.boarding_dialog(floor)))
    }

    async fn boarding_dialog(&self, floor: Floor) -> Result<BoardingDecision> {
        let answer = self
            .prompt(BOARD_PROMPT)
            .await
            .ok_or_else(|| Error::Observer(format!("no answer at floor {floor}")))?;

        if answer.trim() != "y" {
            return Ok(BoardingDecision::Continue);
        }

        let destinations = self
            .read_floors(GO_PROMPT)
            .await
            .ok_or_else(|| Error::Observer(format!("no destinations entered at floor {floor}")))?;
        Ok(BoardingDecision::Board(destinations))
    }
}
