//! Startup error taxonomy.
//!
//! Everything here is fatal: the process prints the error and exits
//! non-zero. Recoverable conditions (no enhanced loop, no browser) are
//! logged where they happen and never reach this type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::lifecycle::LifecycleError;
use crate::observability::LoggingError;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("Failed to build event loop: {0}")]
    EventLoop(#[source] std::io::Error),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}
