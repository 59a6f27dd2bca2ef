//! Run driver: owns the blocking execution of the event loop.
//!
//! # Responsibilities
//! - Run the application's entry point on the loop
//! - Stop on entry-point completion or on a termination signal
//! - Broadcast shutdown, wait out the grace period, then cancel what is left
//! - Map the result to a process exit code
//!
//! # Design Decisions
//! - The entry point runs as a spawned task so a panic becomes a failure
//!   outcome instead of unwinding through the driver
//! - Signal-driven shutdown is a clean exit; entry-point errors are not
//! - A second signal during the grace period cancels the application at once

use std::future::Future;
use std::process::ExitCode;
use std::time::Duration;

use tokio::task::JoinError;

use crate::app::Application;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::{self, Signal};
use crate::lifecycle::state::{Lifecycle, Phase};
use crate::runtime::EventLoop;

/// Time the application gets to stop after shutdown is broadcast.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(10);

/// How the run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The entry point returned `Ok`.
    Completed,
    /// A termination signal stopped the application.
    Interrupted(Signal),
    /// The entry point returned an error.
    Failed(String),
    /// The entry point panicked or was cancelled.
    Panicked,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed | RunOutcome::Interrupted(_))
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

fn outcome_of(joined: Result<anyhow::Result<()>, JoinError>) -> RunOutcome {
    match joined {
        Ok(Ok(())) => RunOutcome::Completed,
        Ok(Err(e)) => {
            let message = format!("{:#}", e);
            tracing::error!(error = %message, "Application failed");
            RunOutcome::Failed(message)
        }
        Err(e) => {
            tracing::error!(error = %e, "Application task aborted");
            RunOutcome::Panicked
        }
    }
}

pub struct RunDriver {
    event_loop: EventLoop,
    grace: Duration,
    lifecycle: Option<Lifecycle>,
}

impl RunDriver {
    pub fn new(event_loop: EventLoop) -> Self {
        Self {
            event_loop,
            grace: DEFAULT_GRACE_PERIOD,
            lifecycle: None,
        }
    }

    pub fn with_grace_period(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// Report RUNNING → SHUTTING_DOWN → TERMINATED on `lifecycle`.
    pub fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = Some(lifecycle);
        self
    }

    /// Run `app` until it returns or the process receives SIGINT/SIGTERM.
    pub fn run<A: Application>(self, app: A) -> RunOutcome {
        let shutdown = Shutdown::new();
        let entry = app.start(shutdown.subscribe());
        self.drive(entry, shutdown, signals::terminate)
    }

    /// Run `entry` until it finishes or a future from `signals` resolves.
    ///
    /// `signals` is called once to wait for the first signal and once more
    /// while the grace period runs. Blocks the calling thread. Every task
    /// still alive when this returns has been cancelled.
    pub fn drive<F, T, S>(self, entry: F, shutdown: Shutdown, mut signals: T) -> RunOutcome
    where
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
        T: FnMut() -> S,
        S: Future<Output = Signal>,
    {
        let RunDriver {
            event_loop,
            grace,
            lifecycle,
        } = self;
        let transition = |phase: Phase| {
            if let Some(lifecycle) = &lifecycle {
                if let Err(e) = lifecycle.advance(phase) {
                    tracing::warn!(error = %e, "Lifecycle out of order");
                }
            }
        };

        transition(Phase::Running);
        tracing::debug!(flavor = %event_loop.flavor(), "Event loop running");

        let outcome = event_loop.block_on(async {
            let mut app = tokio::spawn(entry);

            tokio::select! {
                joined = &mut app => {
                    transition(Phase::ShuttingDown);
                    outcome_of(joined)
                }
                signal = signals() => {
                    transition(Phase::ShuttingDown);
                    tracing::info!(%signal, "Shutdown signal received");
                    let notified = shutdown.trigger();
                    tracing::debug!(subscribers = notified, "Shutdown broadcast");

                    let drained = tokio::select! {
                        joined = tokio::time::timeout(grace, &mut app) => Some(joined),
                        again = signals() => {
                            tracing::warn!(signal = %again, "Second signal received, forcing shutdown");
                            None
                        }
                    };

                    match drained {
                        Some(Ok(joined)) => match outcome_of(joined) {
                            RunOutcome::Completed => RunOutcome::Interrupted(signal),
                            other => other,
                        },
                        Some(Err(_)) => {
                            tracing::warn!(
                                grace_secs = grace.as_secs_f64(),
                                "Application did not stop in time, cancelling"
                            );
                            app.abort();
                            RunOutcome::Interrupted(signal)
                        }
                        None => {
                            app.abort();
                            RunOutcome::Interrupted(signal)
                        }
                    }
                }
            }
        });

        event_loop.shutdown(grace);
        transition(Phase::Terminated);
        tracing::info!(outcome = ?outcome, "Shutdown complete");
        outcome
    }
}
