//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system, ignoring a second call.
///
/// Tests and embedding hosts may both try to install a logger; only the
/// first wins.
pub fn try_init() {
    let _ = env_logger::try_init();
}
