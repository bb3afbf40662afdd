//! Command-line options.

use clap::Parser;
use elevator_core::{
    CarConfig, Floor,
    constants::{DEFAULT_DOOR_TIMEOUT, DEFAULT_FLOOR, DEFAULT_FLOOR_HEIGHT, DEFAULT_SPEED},
};

/// Elevator app simulates an elevator.
#[derive(Parser, Debug, Clone)]
#[command(name = "elevator", version, about, long_about = None)]
pub struct Args {
    /// Speed as meters per second
    #[arg(short, long, default_value_t = DEFAULT_SPEED)]
    pub speed: u32,

    /// Floor height as meters
    #[arg(long, visible_alias = "fh", default_value_t = DEFAULT_FLOOR_HEIGHT)]
    pub floor_height: u32,

    /// Door timeout as seconds, for opening and for closing
    #[arg(long, visible_alias = "dt", default_value_t = DEFAULT_DOOR_TIMEOUT)]
    pub door_timeout: u32,

    /// Floor the car starts at
    #[arg(long, default_value_t = DEFAULT_FLOOR, allow_negative_numbers = true)]
    pub initial_floor: Floor,

    /// Print car events as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn car_config(&self) -> CarConfig {
        CarConfig {
            speed: self.speed,
            floor_height: self.floor_height,
            door_timeout: self.door_timeout,
            initial_floor: self.initial_floor,
        }
    }
}
