//! Application object and factory.
//!
//! # Responsibilities
//! - Define what the bootstrap needs from the application: its web port and
//!   an async entry point that honours the shutdown broadcast
//! - Construct the application from the config dir and the loop handle
//!
//! # Design Decisions
//! - Construction does no I/O; sockets and files are opened in `start`
//! - Any `FnOnce(&Path, Handle) -> App` is a factory, so tests pass closures

pub mod mass;
pub mod web;

pub use mass::{MusicAssistant, DEFAULT_HTTP_PORT};
pub use web::WebServer;

use std::future::Future;
use std::path::Path;

use tokio::runtime::Handle;
use tokio::sync::broadcast;

/// The long-running application launched by the bootstrap.
pub trait Application: Send + 'static {
    /// Port the web interface listens on.
    fn http_port(&self) -> u16;

    /// Run until done or until `shutdown` fires.
    fn start(
        self,
        shutdown: broadcast::Receiver<()>,
    ) -> impl Future<Output = anyhow::Result<()>> + Send + 'static;
}

/// Builds the application object.
pub trait ApplicationFactory {
    type App: Application;

    fn build(self, config_dir: &Path, handle: Handle) -> Self::App;
}

impl<F, A> ApplicationFactory for F
where
    F: FnOnce(&Path, Handle) -> A,
    A: Application,
{
    type App = A;

    fn build(self, config_dir: &Path, handle: Handle) -> A {
        self(config_dir, handle)
    }
}
