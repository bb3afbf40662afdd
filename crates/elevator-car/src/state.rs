//! Car position and door state.

use elevator_core::{Floor, constants::DEFAULT_FLOOR};
use serde::{Deserialize, Serialize};

/// Where the car is and whether its door is open.
///
/// Only the scheduler mutates this; everyone else sees a shared reference
/// or the floor numbers carried by events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarState {
    current_floor: Floor,
    door_open: bool,
}

impl CarState {
    pub fn new(initial_floor: Floor) -> Self {
        Self {
            current_floor: initial_floor,
            door_open: false,
        }
    }

    /// Last floor the car stopped at or passed through.
    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    pub fn is_door_open(&self) -> bool {
        self.door_open
    }

    pub(crate) fn set_floor(&mut self, floor: Floor) {
        self.current_floor = floor;
    }

    pub(crate) fn set_door_open(&mut self, open: bool) {
        self.door_open = open;
    }
}

impl Default for CarState {
    fn default() -> Self {
        Self::new(DEFAULT_FLOOR)
    }
}
