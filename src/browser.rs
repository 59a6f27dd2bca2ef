//! Opening the web interface in the desktop browser.
//!
//! # Responsibilities
//! - Decide, from the platform identifier alone, whether to open a browser
//! - Spawn the platform's URL opener without waiting on it, and reap it
//!
//! # Design Decisions
//! - The decision is a pure function so it is testable without a browser
//! - Launch failures are logged and swallowed; they never stop startup

use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

/// Platforms where a desktop session is assumed.
pub const DESKTOP_PLATFORMS: [&str; 2] = ["Windows", "Darwin"];

/// Outcome of the launch decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserPlan {
    pub launch: bool,
    pub url: String,
}

/// Decide whether to open the web interface on `port`.
pub fn plan_browser_launch(platform_id: &str, port: u16) -> BrowserPlan {
    BrowserPlan {
        launch: DESKTOP_PLATFORMS.contains(&platform_id),
        url: format!("http://localhost:{}", port),
    }
}

/// Something that can open a URL.
pub trait BrowserOpener {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// The system's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserOpener for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        spawn_reaped(opener_command(url)).map(|_| ())
    }
}

/// Spawn `cmd` detached from our stdio; a background thread waits on it.
fn spawn_reaped(mut cmd: Command) -> io::Result<JoinHandle<Option<ExitStatus>>> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    thread::Builder::new()
        .name("browser-opener".into())
        .spawn(move || match child.wait() {
            Ok(status) => {
                tracing::debug!(%status, "Browser opener exited");
                Some(status)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Browser opener could not be reaped");
                None
            }
        })
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

/// Open the web interface if the platform calls for it.
///
/// Returns the plan that was applied; `launch` tells whether an attempt was made.
pub fn launch_browser(platform_id: &str, port: u16, opener: &dyn BrowserOpener) -> BrowserPlan {
    let plan = plan_browser_launch(platform_id, port);
    if !plan.launch {
        tracing::debug!(platform = platform_id, "Skipping browser launch");
        return plan;
    }

    match opener.open(&plan.url) {
        Ok(()) => tracing::info!(url = %plan.url, "Opened web interface in browser"),
        Err(e) => tracing::warn!(url = %plan.url, error = %e, "Unable to open browser"),
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recording {
        opened: RefCell<Vec<String>>,
        fail: bool,
    }

    impl BrowserOpener for Recording {
        fn open(&self, url: &str) -> io::Result<()> {
            self.opened.borrow_mut().push(url.to_string());
            if self.fail {
                Err(io::Error::new(io::ErrorKind::NotFound, "no browser"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_plan_for_desktop_platforms() {
        for platform in ["Windows", "Darwin"] {
            let plan = plan_browser_launch(platform, 8095);
            assert!(plan.launch, "{platform}");
            assert_eq!(plan.url, "http://localhost:8095");
        }
    }

    #[test]
    fn test_plan_for_other_platforms() {
        for platform in ["Linux", "FreeBSD", "windows", "darwin", ""] {
            let plan = plan_browser_launch(platform, 9000);
            assert!(!plan.launch, "{platform}");
            assert_eq!(plan.url, "http://localhost:9000");
        }
    }

    #[test]
    fn test_launch_attempts_only_on_desktop() {
        let opener = Recording::default();
        launch_browser("Linux", 8095, &opener);
        assert!(opener.opened.borrow().is_empty());

        launch_browser("Darwin", 8095, &opener);
        assert_eq!(*opener.opened.borrow(), vec!["http://localhost:8095".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_opener_process_is_reaped() {
        let reaper = spawn_reaped(Command::new("true")).unwrap();
        let status = reaper.join().unwrap().expect("child was not waited on");
        assert!(status.success());
    }

    #[test]
    fn test_missing_opener_is_an_error() {
        let result = spawn_reaped(Command::new("mass-no-such-opener-binary"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_launch_failure_is_tolerated() {
        let opener = Recording {
            fail: true,
            ..Default::default()
        };
        let plan = launch_browser("Windows", 8095, &opener);
        assert!(plan.launch);
        assert_eq!(opener.opened.borrow().len(), 1);
    }
}
