//! Startup configuration subsystem.
//!
//! # Data Flow
//! ```text
//! command line
//!     → options.rs (clap parse, usage errors exit here)
//!     → paths.rs (explicit dir or platform default → absolute → created)
//!     → StartupOptions (immutable for the rest of the process)
//! ```
//!
//! # Design Decisions
//! - Parsing happens before any filesystem side effect
//! - Host lookups (home, APPDATA, OS name) are captured in plain values so
//!   resolution is testable without touching the real environment
//! - A config directory that cannot be created is fatal

pub mod options;
pub mod paths;

pub use options::{Cli, StartupOptions};
pub use paths::{default_config_dir, ensure_config_dir, HostDirs, Platform, CONFIG_DIR_NAME};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving the configuration directory.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither APPDATA nor a home directory could be found.
    #[error("Unable to determine a home directory for the default configuration")]
    NoHomeDirectory,

    /// The path could not be made absolute.
    #[error("Invalid configuration path {path:?}: {source}")]
    Absolute {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating the directory (or one of its parents) failed.
    #[error("Failed to create configuration directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
