//! Configuration directory resolution.
//!
//! # Responsibilities
//! - Identify the host platform the way the rest of the bootstrap names it
//! - Derive the default configuration directory
//! - Make the chosen directory absolute and create it

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::ConfigError;

/// Name of the directory holding persistent configuration.
pub const CONFIG_DIR_NAME: &str = ".musicassistant";

/// Host operating system, named by its reported system identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Darwin,
    Linux,
    Other(String),
}

impl Platform {
    /// Platform of the running process.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a Rust target OS name (`std::env::consts::OS`) to a platform.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "macos" => Platform::Darwin,
            "linux" => Platform::Linux,
            other => {
                let mut chars = other.chars();
                let name = match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::from("Unknown"),
                };
                Platform::Other(name)
            }
        }
    }

    /// System identifier, e.g. `"Windows"`, `"Darwin"`, `"Linux"`.
    pub fn identifier(&self) -> &str {
        match self {
            Platform::Windows => "Windows",
            Platform::Darwin => "Darwin",
            Platform::Linux => "Linux",
            Platform::Other(name) => name,
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Host directories the default location is derived from.
#[derive(Debug, Clone, Default)]
pub struct HostDirs {
    /// Value of `APPDATA` (only consulted on Windows).
    pub app_data: Option<PathBuf>,
    /// The user's home directory.
    pub home: Option<PathBuf>,
}

impl HostDirs {
    /// Capture the directories of the running process.
    pub fn from_env() -> Self {
        Self {
            app_data: std::env::var_os("APPDATA")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            home: dirs::home_dir(),
        }
    }
}

/// Default configuration directory for `platform`.
///
/// Windows uses `%APPDATA%`, falling back to the home directory when it is
/// unset; every other platform uses the home directory.
pub fn default_config_dir(platform: &Platform, dirs: &HostDirs) -> Result<PathBuf, ConfigError> {
    let root = if platform.is_windows() {
        dirs.app_data.as_ref().or(dirs.home.as_ref())
    } else {
        dirs.home.as_ref()
    };

    root.map(|r| r.join(CONFIG_DIR_NAME))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Make `path` absolute and create it (with parents) if missing.
pub fn ensure_config_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let absolute = std::path::absolute(path).map_err(|source| ConfigError::Absolute {
        path: path.to_path_buf(),
        source,
    })?;

    if !absolute.is_dir() {
        fs::create_dir_all(&absolute).map_err(|source| ConfigError::CreateDir {
            path: absolute.clone(),
            source,
        })?;
    }

    Ok(absolute)
}
