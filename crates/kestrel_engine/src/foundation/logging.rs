//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Reads the `RUST_LOG` environment variable for filtering. Applications call
/// this once before constructing the engine.
pub fn init() {
    env_logger::init();
}
