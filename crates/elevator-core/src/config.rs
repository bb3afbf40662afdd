//! Car configuration and the timing parameters derived from it.
//!
//! The console front end collects speed, floor height and door timeout;
//! [`CarConfig::timing`] turns them into the two durations the scheduler
//! actually sleeps for. Both are fixed for the lifetime of a car.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
    Error, Result,
    constants::{DEFAULT_DOOR_TIMEOUT, DEFAULT_FLOOR, DEFAULT_FLOOR_HEIGHT, DEFAULT_SPEED},
    types::Floor,
};

/// User-facing car configuration.
///
/// # Examples
///
/// ```
/// use elevator_core::CarConfig;
/// use std::time::Duration;
///
/// let config = CarConfig::default();
/// let timing = config.timing().unwrap();
///
/// assert_eq!(timing.per_floor, Duration::from_secs(2));
/// assert_eq!(timing.door_dwell, Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarConfig {
    /// Speed in meters per second.
    pub speed: u32,

    /// Floor height in meters.
    pub floor_height: u32,

    /// Door dwell time in seconds, for opening and for closing.
    pub door_timeout: u32,

    /// Floor the car starts at.
    pub initial_floor: Floor,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            floor_height: DEFAULT_FLOOR_HEIGHT,
            door_timeout: DEFAULT_DOOR_TIMEOUT,
            initial_floor: DEFAULT_FLOOR,
        }
    }
}

impl CarConfig {
    /// Derive the motion and door timing for this configuration.
    ///
    /// Time per floor is `floor_height / speed` seconds, computed in
    /// milliseconds so that fast cars do not round down to zero.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the speed is zero.
    ///
    /// ```
    /// use elevator_core::CarConfig;
    /// use std::time::Duration;
    ///
    /// let config = CarConfig { speed: 20, floor_height: 2, ..CarConfig::default() };
    /// assert_eq!(config.timing().unwrap().per_floor, Duration::from_millis(100));
    ///
    /// let stalled = CarConfig { speed: 0, ..CarConfig::default() };
    /// assert!(stalled.timing().is_err());
    /// ```
    pub fn timing(&self) -> Result<Timing> {
        if self.speed == 0 {
            return Err(Error::Config("speed must be greater than zero".to_string()));
        }

        let per_floor_ms = u64::from(self.floor_height) * 1000 / u64::from(self.speed);
        Ok(Timing {
            per_floor: Duration::from_millis(per_floor_ms),
            door_dwell: Duration::from_secs(u64::from(self.door_timeout)),
        })
    }
}

/// Durations the scheduler waits for each simulated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Time to travel one floor-unit.
    pub per_floor: Duration,

    /// Time each door open or door close takes.
    pub door_dwell: Duration,
}

impl Timing {
    pub fn new(per_floor: Duration, door_dwell: Duration) -> Self {
        Self {
            per_floor,
            door_dwell,
        }
    }

    /// Timing with no waits at all. Useful for tests and dry runs.
    #[must_use]
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}
