//! Interactive elevator console.
//!
//! Runs one simulated car on a service task and drives it from standard
//! input. Set `RUST_LOG` for scheduler diagnostics on stderr.

mod cli;
mod console;

use anyhow::{Context, Result};
use clap::Parser;
use elevator_car::{CarEvent, Elevator, ElevatorService, EventKind, ServiceHandle};
use elevator_core::Floor;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::console::{Action, CALL_PROMPT, Console, GO_PROMPT, INPUT_ERROR, MENU_PROMPT};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let shutdown = CancellationToken::new();
    let mut elevator = Elevator::from_config(&args.car_config())
        .context("Invalid car configuration")?
        .with_shutdown(shutdown.clone());

    let console = Console::stdin(shutdown.clone());
    print_events(&mut elevator, args.json);

    let observer = console.clone();
    elevator.set_arrival_observer(move |floor: Floor| observer.ask_boarding(floor));

    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping the car");
            ctrl_c.cancel();
        }
    });

    info!(config = ?args.car_config(), "Starting elevator");
    let service = ElevatorService::spawn(elevator);
    let outcome = run(&console, &service.handle()).await;

    let elevator = service.shutdown().await?;
    info!(floor = elevator.state().current_floor(), "Elevator stopped");

    outcome
}

/// Menu loop. Returns when the user quits, input closes or the car is
/// cancelled between batches.
async fn run(console: &Console, handle: &ServiceHandle) -> Result<()> {
    loop {
        let Some(line) = console.prompt(MENU_PROMPT).await else {
            return Ok(());
        };

        match Action::parse(&line) {
            Action::CallCar => {
                let Some(floors) = console.read_floors(CALL_PROMPT).await else {
                    return Ok(());
                };
                handle
                    .call_from(floors)
                    .await
                    .context("Hall call batch failed")?;
            }
            Action::GoToFloors => {
                let Some(floors) = console.read_floors(GO_PROMPT).await else {
                    return Ok(());
                };
                handle
                    .pressed_floor_buttons(floors)
                    .await
                    .context("Destination batch failed")?;
            }
            Action::Quit => return Ok(()),
            Action::Unknown => {
                debug!(input = %line.trim(), "Unknown menu choice");
                println!("{INPUT_ERROR}");
            }
        }
    }
}

fn print_events(elevator: &mut Elevator, json: bool) {
    elevator.on(EventKind::FloorPassed, move |floor| {
        println!("{}", console::render(&CarEvent::floor_passed(floor), json));
    });
    elevator.on(EventKind::DoorOpened, move |floor| {
        println!("{}", console::render(&CarEvent::door_opened(floor), json));
    });
    elevator.on(EventKind::DoorClosed, move |floor| {
        println!("{}", console::render(&CarEvent::door_closed(floor), json));
    });
}
