//! Default values shared by the car, the service and the console front end.
//!
//! Distances are in meters, speeds in meters per second and timeouts in
//! seconds, matching the units accepted on the command line.
//!
//! ```
//! use elevator_core::constants::*;
//!
//! // 4 m floors at 2 m/s take two seconds each
//! assert_eq!(DEFAULT_FLOOR_HEIGHT / DEFAULT_SPEED, 2);
//! assert_eq!(DEFAULT_FLOOR, 1);
//! ```

use crate::types::Floor;

// ============================================================================
// Car Defaults
// ============================================================================

/// Floor the car starts at unless configured otherwise.
pub const DEFAULT_FLOOR: Floor = 1;

/// Car speed in meters per second.
pub const DEFAULT_SPEED: u32 = 2;

/// Height of one floor in meters.
pub const DEFAULT_FLOOR_HEIGHT: u32 = 4;

/// Door dwell time in seconds, applied to every open and every close.
pub const DEFAULT_DOOR_TIMEOUT: u32 = 2;

// ============================================================================
// Dispatch
// ============================================================================

/// Maximum number of dispatch phase transitions kept in history.
///
/// A hall-call stop with boarding records five transitions, so this covers
/// roughly twenty boarding stops.
pub const MAX_PHASE_HISTORY: usize = 100;

/// Capacity of the request channel feeding the elevator service task.
pub const SERVICE_QUEUE_CAPACITY: usize = 32;
