//! Shared fakes for bootstrap integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mass::app::Application;
use mass::config::HostDirs;
use mass::browser::BrowserOpener;
use mass::lifecycle::Signal;
use mass::observability::{LogInstaller, LogSettings, LoggingError};
use mass::runtime::{LoopProbe, LoopUnavailable};
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Probe with a fixed answer.
pub struct FixedProbe(pub Result<(), LoopUnavailable>);

impl LoopProbe for FixedProbe {
    fn probe(&self) -> Result<(), LoopUnavailable> {
        self.0.clone()
    }
}

/// Browser that records the URLs it was asked to open.
#[derive(Clone, Default)]
pub struct RecordingBrowser {
    pub opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingBrowser {
    pub fn attempts(&self) -> usize {
        self.opened.lock().unwrap().len()
    }
}

impl BrowserOpener for RecordingBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Log installer that records settings instead of installing a global sink.
#[derive(Clone, Default)]
pub struct RecordingLogs {
    pub installed: Arc<Mutex<Vec<LogSettings>>>,
}

impl RecordingLogs {
    pub fn single(&self) -> LogSettings {
        let installed = self.installed.lock().unwrap();
        assert_eq!(installed.len(), 1, "log sink must be installed exactly once");
        installed[0].clone()
    }
}

impl LogInstaller for RecordingLogs {
    fn install(&self, settings: &LogSettings) -> Result<(), LoggingError> {
        self.installed.lock().unwrap().push(settings.clone());
        Ok(())
    }
}

/// Counts WARN events.
#[derive(Clone, Default)]
pub struct WarnCounter(pub Arc<AtomicUsize>);

impl WarnCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

pub type SignalFuture = Pin<Box<dyn Future<Output = Signal>>>;

/// Signal source whose first wait resolves with `first`; later waits never resolve.
pub fn once(first: impl Future<Output = Signal> + 'static) -> impl FnMut() -> SignalFuture {
    let first: SignalFuture = Box::pin(first);
    let mut first = Some(first);
    move || match first.take() {
        Some(fut) => fut,
        None => {
            let never: SignalFuture = Box::pin(std::future::pending::<Signal>());
            never
        }
    }
}

/// Signal source that delivers `signal` once, after `delay`.
pub fn signal_after(delay: Duration, signal: Signal) -> impl FnMut() -> SignalFuture {
    once(async move {
        tokio::time::sleep(delay).await;
        signal
    })
}

/// Signal source that never fires.
pub fn no_signal() -> impl FnMut() -> SignalFuture {
    once(std::future::pending::<Signal>())
}

/// Host directories rooted in a scratch home.
pub fn scratch_dirs(home: &Path) -> HostDirs {
    HostDirs {
        app_data: None,
        home: Some(home.to_path_buf()),
    }
}

/// What the test application does when started.
#[derive(Clone)]
pub enum Behavior {
    ReturnOk,
    Fail(&'static str),
    Panic,
    WaitForShutdown,
    IgnoreShutdown,
    /// Spawn a task that never finishes, then wait for shutdown.
    LeakTask(Arc<AtomicBool>),
}

/// Sets the flag when dropped.
pub struct DropFlag(pub Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

pub struct TestApp {
    pub config_dir: PathBuf,
    pub handle: Handle,
    pub port: u16,
    pub behavior: Behavior,
}

impl TestApp {
    pub fn factory(port: u16, behavior: Behavior) -> impl FnOnce(&Path, Handle) -> TestApp {
        move |config_dir: &Path, handle: Handle| TestApp {
            config_dir: config_dir.to_path_buf(),
            handle,
            port,
            behavior,
        }
    }
}

impl Application for TestApp {
    fn http_port(&self) -> u16 {
        self.port
    }

    fn start(
        self,
        mut shutdown: broadcast::Receiver<()>,
    ) -> impl Future<Output = anyhow::Result<()>> + Send + 'static {
        async move {
            match self.behavior {
                Behavior::ReturnOk => Ok(()),
                Behavior::Fail(msg) => Err(anyhow::anyhow!(msg)),
                Behavior::Panic => panic!("test application panicked"),
                Behavior::WaitForShutdown => {
                    let _ = shutdown.recv().await;
                    Ok(())
                }
                Behavior::IgnoreShutdown => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(())
                }
                Behavior::LeakTask(flag) => {
                    let guard = DropFlag(flag);
                    self.handle.spawn(async move {
                        let _guard = guard;
                        std::future::pending::<()>().await;
                    });
                    let _ = shutdown.recv().await;
                    Ok(())
                }
            }
        }
    }
}
