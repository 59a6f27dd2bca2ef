//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve and create the configuration directory
//! - Install the log sink for the chosen verbosity
//! - Select and build the event loop
//! - Construct the application on that loop
//! - Open the web interface on desktop platforms
//!
//! # Design Decisions
//! - Every host touchpoint (platform, directories, probe, browser, log sink)
//!   is injectable so the whole sequence runs under test
//! - Steps run in order on the calling thread; none of them suspends

use std::time::Duration;

use crate::app::{Application, ApplicationFactory};
use crate::browser::{launch_browser, BrowserOpener, BrowserPlan, SystemBrowser};
use crate::config::{Cli, HostDirs, Platform, StartupOptions};
use crate::error::BootstrapError;
use crate::lifecycle::driver::{RunDriver, RunOutcome};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::Signal;
use crate::lifecycle::state::{Lifecycle, Phase};
use crate::observability::{ConsoleSink, LogInstaller, LogSettings};
use crate::runtime::{select_event_loop, EventLoop, HostProbe, LoopProbe};

/// Host-facing pieces used during startup.
pub struct Bootstrap {
    platform: Platform,
    dirs: HostDirs,
    probe: Box<dyn LoopProbe>,
    browser: Box<dyn BrowserOpener>,
    logging: Box<dyn LogInstaller>,
    lifecycle: Lifecycle,
}

impl Bootstrap {
    /// Bootstrap wired to the running host.
    pub fn from_host() -> Self {
        Self::new(Platform::current(), HostDirs::from_env())
    }

    /// Bootstrap for `platform`, with the host probe, browser and console sink.
    pub fn new(platform: Platform, dirs: HostDirs) -> Self {
        Self {
            platform,
            dirs,
            probe: Box::new(HostProbe),
            browser: Box::new(SystemBrowser),
            logging: Box::new(ConsoleSink),
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn with_probe(mut self, probe: impl LoopProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn with_browser(mut self, browser: impl BrowserOpener + 'static) -> Self {
        self.browser = Box::new(browser);
        self
    }

    pub fn with_log_installer(mut self, logging: impl LogInstaller + 'static) -> Self {
        self.logging = Box::new(logging);
        self
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.clone()
    }

    /// Run every startup step up to, but not including, the run loop.
    pub fn prepare<F>(self, cli: Cli, factory: F) -> Result<Prepared<F::App>, BootstrapError>
    where
        F: ApplicationFactory,
    {
        let lifecycle = self.lifecycle;

        lifecycle.advance(Phase::Configuring)?;
        let options = cli.into_options(&self.platform, &self.dirs)?;

        let settings = LogSettings::for_debug(options.debug);
        self.logging.install(&settings)?;
        lifecycle.advance(Phase::LoggingReady)?;
        tracing::info!(
            config_dir = %options.config_dir.display(),
            debug = options.debug,
            platform = %self.platform,
            "Starting Music Assistant"
        );

        let event_loop =
            select_event_loop(self.probe.as_ref(), options.debug).map_err(BootstrapError::EventLoop)?;
        lifecycle.advance(Phase::LoopSelected)?;

        let app = factory.build(&options.config_dir, event_loop.handle());
        lifecycle.advance(Phase::AppConstructed)?;

        let browser = launch_browser(self.platform.identifier(), app.http_port(), self.browser.as_ref());

        Ok(Prepared {
            options,
            app,
            event_loop,
            lifecycle,
            browser,
        })
    }
}

/// A fully started process, ready to hand over to the run driver.
pub struct Prepared<A> {
    pub options: StartupOptions,
    pub app: A,
    pub event_loop: EventLoop,
    pub lifecycle: Lifecycle,
    /// Browser decision that was applied.
    pub browser: BrowserPlan,
}

impl<A: Application> Prepared<A> {
    /// Run until shutdown; blocks the calling thread.
    pub fn run(self) -> RunOutcome {
        RunDriver::new(self.event_loop)
            .with_lifecycle(self.lifecycle)
            .run(self.app)
    }

    /// Run until the app finishes or a future from `signals` resolves.
    pub fn run_until<T, S>(self, signals: T, grace: Duration) -> RunOutcome
    where
        T: FnMut() -> S,
        S: std::future::Future<Output = Signal>,
    {
        let shutdown = Shutdown::new();
        let entry = self.app.start(shutdown.subscribe());
        RunDriver::new(self.event_loop)
            .with_grace_period(grace)
            .with_lifecycle(self.lifecycle)
            .drive(entry, shutdown, signals)
    }
}
