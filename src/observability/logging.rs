//! Log level policy and sink installation.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use super::format::ConsoleFormat;

/// Database layer, chatty at debug level.
pub const DATABASE_TARGET: &str = "sqlx";

/// Target of the async runtime's own events.
pub const RUNTIME_TARGET: &str = "tokio";

/// Errors raised while installing the log sink.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("A log sink is already installed: {0}")]
    AlreadyInstalled(String),
}

/// Process-wide logging levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    root: Level,
    overrides: Vec<(&'static str, Level)>,
}

impl LogSettings {
    /// Levels for a normal or debug run.
    ///
    /// Debug mode lowers the root to DEBUG but keeps the database layer at
    /// INFO and the runtime at WARN.
    pub fn for_debug(debug: bool) -> Self {
        if !debug {
            return Self {
                root: Level::INFO,
                overrides: Vec::new(),
            };
        }

        Self {
            root: Level::DEBUG,
            overrides: vec![(DATABASE_TARGET, Level::INFO), (RUNTIME_TARGET, Level::WARN)],
        }
    }

    pub fn root_level(&self) -> Level {
        self.root
    }

    /// Override pinned for `target`, if any.
    pub fn override_for(&self, target: &str) -> Option<Level> {
        self.overrides
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, level)| *level)
    }

    /// Level actually applied to events from `target`.
    pub fn effective_level(&self, target: &str) -> Level {
        let crate_name = target.split("::").next().unwrap_or(target);
        self.override_for(crate_name).unwrap_or(self.root)
    }

    /// Filter directives, e.g. `debug,sqlx=info,tokio=warn`.
    pub fn directives(&self) -> String {
        let mut directives = vec![level_name(self.root)];
        directives.extend(
            self.overrides
                .iter()
                .map(|(target, level)| format!("{}={}", target, level_name(*level))),
        );
        directives.join(",")
    }

    pub fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        Ok(EnvFilter::try_new(self.directives())?)
    }
}

fn level_name(level: Level) -> String {
    level.to_string().to_ascii_lowercase()
}

/// Installs the process-wide log sink.
pub trait LogInstaller {
    fn install(&self, settings: &LogSettings) -> Result<(), LoggingError>;
}

/// Console sink: fixed-format lines on standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LogInstaller for ConsoleSink {
    fn install(&self, settings: &LogSettings) -> Result<(), LoggingError> {
        tracing_subscriber::fmt()
            .with_env_filter(settings.env_filter()?)
            .with_ansi(false)
            .event_format(ConsoleFormat::default())
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| LoggingError::AlreadyInstalled(e.to_string()))
    }
}
