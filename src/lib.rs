//! Music Assistant server bootstrap.
//!
//! # Architecture Overview
//!
//! ```text
//!   argv ──▶ config (clap, paths) ──▶ observability (log sink)
//!                                         │
//!                                         ▼
//!                               runtime (probe → event loop)
//!                                         │
//!                                         ▼
//!                     app (factory → MusicAssistant) ──▶ browser (desktop only)
//!                                         │
//!                                         ▼
//!                 lifecycle::driver (block on loop, signals, shutdown, exit code)
//! ```
//!
//! Startup is strictly sequential on the main thread; the only blocking call
//! is the run driver.

// Startup steps
pub mod app;
pub mod browser;
pub mod config;
pub mod observability;
pub mod runtime;

// Cross-cutting concerns
pub mod error;
pub mod lifecycle;

pub use app::{Application, ApplicationFactory, MusicAssistant};
pub use config::{Cli, StartupOptions};
pub use error::BootstrapError;
pub use lifecycle::{Bootstrap, RunDriver, RunOutcome, Shutdown};
