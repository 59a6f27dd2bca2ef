//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve config → Install logging → Select loop → Build app → Browser
//!
//! Run (driver.rs):
//!     Spawn entry point → wait for it or a signal → broadcast shutdown
//!     → grace period → cancel remaining tasks → exit code
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: nothing logs before the sink exists, nothing is built
//!   before the loop it runs on
//! - Fail fast: config and logging errors abort startup
//! - Shutdown has a deadline: tasks still alive after it are dropped

pub mod driver;
pub mod shutdown;
pub mod signals;
pub mod startup;
pub mod state;

pub use driver::{RunDriver, RunOutcome, DEFAULT_GRACE_PERIOD};
pub use shutdown::Shutdown;
pub use signals::Signal;
pub use startup::{Bootstrap, Prepared};
pub use state::{Lifecycle, LifecycleError, Phase};
