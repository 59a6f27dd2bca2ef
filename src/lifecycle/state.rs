//! Process lifecycle state machine.
//!
//! # States
//! ```text
//! Unstarted → Configuring → LoggingReady → LoopSelected → AppConstructed
//!           → Running → ShuttingDown → Terminated
//! ```
//!
//! # Design Decisions
//! - Only the immediate successor is accepted; no skipping, no re-entry
//! - Shared handle so the startup sequence and run driver advance the same state

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Unstarted,
    Configuring,
    LoggingReady,
    LoopSelected,
    AppConstructed,
    Running,
    ShuttingDown,
    Terminated,
}

impl Phase {
    /// The only phase allowed to follow this one.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Unstarted => Some(Phase::Configuring),
            Phase::Configuring => Some(Phase::LoggingReady),
            Phase::LoggingReady => Some(Phase::LoopSelected),
            Phase::LoopSelected => Some(Phase::AppConstructed),
            Phase::AppConstructed => Some(Phase::Running),
            Phase::Running => Some(Phase::ShuttingDown),
            Phase::ShuttingDown => Some(Phase::Terminated),
            Phase::Terminated => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Unstarted => "UNSTARTED",
            Phase::Configuring => "CONFIGURING",
            Phase::LoggingReady => "LOGGING_READY",
            Phase::LoopSelected => "LOOP_SELECTED",
            Phase::AppConstructed => "APP_CONSTRUCTED",
            Phase::Running => "RUNNING",
            Phase::ShuttingDown => "SHUTTING_DOWN",
            Phase::Terminated => "TERMINATED",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("Invalid lifecycle transition {from} → {to}")]
    InvalidTransition { from: Phase, to: Phase },
}

/// Shared view of the current phase.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    phase: Arc<Mutex<Phase>>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Arc::new(Mutex::new(Phase::Unstarted)),
        }
    }

    pub fn phase(&self) -> Phase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move to `to`, which must be the successor of the current phase.
    pub fn advance(&self, to: Phase) -> Result<(), LifecycleError> {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if phase.next() != Some(to) {
            return Err(LifecycleError::InvalidTransition { from: *phase, to });
        }

        tracing::debug!(from = %*phase, to = %to, "Lifecycle transition");
        *phase = to;
        Ok(())
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
