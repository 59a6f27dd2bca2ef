//! Event loop selection.
//!
//! # Data Flow
//! ```text
//! probe.rs (is the work-stealing scheduler usable here?)
//!     → yes: multi-threaded runtime
//!     → no:  one WARN line, current-thread runtime
//! selector.rs builds exactly one Runtime, wrapped in EventLoop
//! watchdog.rs runs on that loop in debug mode and reports stalls
//! ```
//!
//! # Design Decisions
//! - Probing is separate from building so both branches are testable
//! - An unavailable scheduler is never fatal
//! - The EventLoop is not Clone; the run driver takes it by value

pub mod probe;
pub mod selector;
pub mod watchdog;

pub use probe::{HostProbe, LoopProbe, LoopUnavailable};
pub use selector::{select_event_loop, EventLoop, LoopFlavor};
