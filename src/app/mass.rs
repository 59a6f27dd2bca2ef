//! The Music Assistant application object.

use std::future::Future;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::runtime::Handle;
use tokio::sync::broadcast;

use super::web::{ServerInfo, WebServer};
use super::Application;

/// Port of the web interface unless overridden.
pub const DEFAULT_HTTP_PORT: u16 = 8095;

pub struct MusicAssistant {
    config_dir: PathBuf,
    handle: Handle,
    http_port: u16,
}

impl MusicAssistant {
    pub fn new(config_dir: &Path, handle: Handle) -> Self {
        Self::with_http_port(config_dir, handle, DEFAULT_HTTP_PORT)
    }

    pub fn with_http_port(config_dir: &Path, handle: Handle, http_port: u16) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            handle,
            http_port,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    fn info(&self) -> ServerInfo {
        ServerInfo {
            name: "Music Assistant".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            config_dir: self.config_dir.display().to_string(),
            http_port: self.http_port,
        }
    }
}

impl Application for MusicAssistant {
    fn http_port(&self) -> u16 {
        self.http_port
    }

    fn start(
        self,
        shutdown: broadcast::Receiver<()>,
    ) -> impl Future<Output = anyhow::Result<()>> + Send + 'static {
        async move {
            let addr = SocketAddr::from(([0, 0, 0, 0], self.http_port));
            let listener = TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind web interface on {}", addr))?;

            tracing::info!(
                address = %addr,
                config_dir = %self.config_dir.display(),
                "Music Assistant started"
            );

            let server = WebServer::new(self.info());
            self.handle
                .spawn(server.run(listener, shutdown))
                .await
                .context("Web server task failed")??;

            tracing::info!("Music Assistant stopped");
            Ok(())
        }
    }
}
