//! Console line format.
//!
//! ```text
//! 2024-05-01 12:00:00.123 INFO  mass.startup -- Configuration resolved config_dir="/tmp/mass"
//! ```
//!
//! The logger name is the first segment of the event target and the module is
//! the last segment of the emitting module path.

use std::fmt;

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let ts = chrono::Local::now().format(TIMESTAMP_FORMAT);
        let level = meta.level().to_string();

        write!(
            writer,
            "{} {:<5} {}.{} -- ",
            ts,
            level,
            logger_name(meta.target()),
            module_name(meta.module_path()),
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn logger_name(target: &str) -> &str {
    target.split("::").next().unwrap_or(target)
}

fn module_name(module_path: Option<&str>) -> &str {
    module_path
        .and_then(|p| p.rsplit("::").next())
        .unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture<F: FnOnce()>(f: F) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .event_format(ConsoleFormat)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        out.contents()
    }

    #[test]
    fn test_line_layout() {
        let out = capture(|| tracing::info!(port = 8095, "Web server ready"));
        let line = out.lines().next().unwrap();

        // "YYYY-MM-DD HH:MM:SS.mmm" is 23 characters.
        assert_eq!(&line[4..5], "-");
        assert_eq!(&line[23..24], " ");
        assert!(line[24..].starts_with("INFO  mass.tests -- Web server ready"), "{line}");
        assert!(line.ends_with("Web server ready port=8095"), "{line}");
        assert!(!line.contains('\x1b'), "escape codes in {line:?}");
    }

    #[test]
    fn test_explicit_target_names_logger() {
        let out = capture(|| tracing::warn!(target: "sqlx::query", "slow statement"));
        assert!(out.contains("WARN  sqlx.tests -- slow statement"), "{out}");
    }

    #[test]
    fn test_name_helpers() {
        assert_eq!(logger_name("mass::lifecycle::driver"), "mass");
        assert_eq!(logger_name("plain"), "plain");
        assert_eq!(module_name(Some("mass::lifecycle::driver")), "driver");
        assert_eq!(module_name(None), "-");
    }
}
