//! Logging setup for the ASDTS process.

mod logging;
mod rotation;

pub use logging::{level_directive, setup_logging};
pub use rotation::RotatingFileWriter;
