//! Command-line options.

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};

use super::paths::{default_config_dir, ensure_config_dir, HostDirs, Platform};
use super::ConfigError;

/// Command-line surface of the `mass` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "mass")]
#[command(about = "Music Assistant server", long_about = None, version)]
pub struct Cli {
    /// Directory that contains the Music Assistant configuration
    #[arg(short = 'c', long = "config", value_name = "path_to_config_dir")]
    pub config: Option<PathBuf>,

    /// Start Music Assistant with verbose debug logging
    #[arg(
        long,
        value_name = "value",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub debug: bool,
}

/// Validated startup options, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupOptions {
    /// Absolute, existing configuration directory.
    pub config_dir: PathBuf,
    pub debug: bool,
}

impl Cli {
    /// Resolve the configuration directory and freeze the options.
    ///
    /// The directory is created when missing; failure is fatal to startup.
    pub fn into_options(self, platform: &Platform, dirs: &HostDirs) -> Result<StartupOptions, ConfigError> {
        let requested = match self.config {
            Some(path) => path,
            None => default_config_dir(platform, dirs)?,
        };
        let config_dir = ensure_config_dir(&requested)?;

        Ok(StartupOptions {
            config_dir,
            debug: self.debug,
        })
    }
}
