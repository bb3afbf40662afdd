use thiserror::Error;

use crate::types::Floor;

#[derive(Error, Debug)]
pub enum Error {
    // Scheduling errors
    #[error("Nearest-floor search called with no candidate floors")]
    NoCandidates,

    #[error("Interrupted while the car was at floor {floor}")]
    Interrupted { floor: Floor },

    #[error("Invalid phase transition from {from} to {to}")]
    InvalidPhaseTransition { from: String, to: String },

    // Arrival observer errors
    #[error("Arrival observer failed: {0}")]
    Observer(String),

    // Service errors
    #[error("Elevator service is not running")]
    ServiceUnavailable,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error aborted a batch because the car was cancelled.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Error::Interrupted { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
