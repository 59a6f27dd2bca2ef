//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! debug flag
//!     → logging.rs (LogSettings: root level + per-target overrides)
//!     → LogInstaller (one process-wide sink on stderr)
//!     → format.rs (fixed line layout)
//! ```
//!
//! # Design Decisions
//! - Settings are a plain value computed from the debug flag, so the level
//!   policy is testable without installing a global subscriber
//! - Exactly one sink per process; a second install is an error
//! - Infrastructure targets are pinned to quieter levels in debug mode

pub mod format;
pub mod logging;

pub use format::ConsoleFormat;
pub use logging::{ConsoleSink, LogInstaller, LogSettings, LoggingError};
