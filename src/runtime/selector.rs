//! Event loop construction.

use std::fmt;
use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::runtime::{Builder, Handle, Runtime};

use super::probe::LoopProbe;
use super::watchdog;

/// Scheduler backing the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopFlavor {
    /// Multi-threaded work-stealing scheduler.
    Enhanced,
    /// Single-threaded scheduler driven by the main thread.
    Default,
}

impl fmt::Display for LoopFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopFlavor::Enhanced => f.write_str("multi-thread"),
            LoopFlavor::Default => f.write_str("current-thread"),
        }
    }
}

/// The process's single event loop.
pub struct EventLoop {
    runtime: Runtime,
    flavor: LoopFlavor,
    debug: bool,
}

impl EventLoop {
    /// Build a loop of the given flavor.
    ///
    /// With `debug` set, worker threads log their lifecycle and a stall
    /// watchdog is spawned on the loop.
    pub fn build(flavor: LoopFlavor, debug: bool) -> io::Result<Self> {
        let mut builder = match flavor {
            LoopFlavor::Enhanced => Builder::new_multi_thread(),
            LoopFlavor::Default => Builder::new_current_thread(),
        };
        builder.enable_all().thread_name("mass-runtime");

        if debug {
            builder
                .on_thread_start(|| tracing::debug!("Worker thread started"))
                .on_thread_stop(|| tracing::debug!("Worker thread stopped"));
        }

        let runtime = builder.build()?;

        if debug {
            runtime.spawn(watchdog::watch(watchdog::TICK_INTERVAL, watchdog::STALL_THRESHOLD));
        }

        Ok(Self {
            runtime,
            flavor,
            debug,
        })
    }

    pub fn flavor(&self) -> LoopFlavor {
        self.flavor
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Handle for spawning onto this loop.
    pub fn handle(&self) -> Handle {
        self.runtime.handle().clone()
    }

    /// Drive `future` to completion on the calling thread.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Stop the loop, dropping every task still pending after `grace`.
    pub fn shutdown(self, grace: Duration) {
        self.runtime.shutdown_timeout(grace);
    }
}

impl fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLoop")
            .field("flavor", &self.flavor)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Pick and build the event loop.
///
/// An unavailable enhanced loop is logged once at WARN and replaced by the
/// default one.
pub fn select_event_loop(probe: &dyn LoopProbe, debug: bool) -> io::Result<EventLoop> {
    let flavor = match probe.probe() {
        Ok(()) => LoopFlavor::Enhanced,
        Err(reason) => {
            tracing::warn!(%reason, "Multi-thread scheduler support is disabled");
            LoopFlavor::Default
        }
    };

    let event_loop = EventLoop::build(flavor, debug)?;
    tracing::debug!(flavor = %flavor, debug = event_loop.debug(), "Event loop installed");
    Ok(event_loop)
}
