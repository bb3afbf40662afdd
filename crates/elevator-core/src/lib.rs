pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::{CarConfig, Timing};
pub use error::{Error, Result};
pub use types::*;
