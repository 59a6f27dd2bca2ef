//! Stall detection for debug runs.
//!
//! A task ticks on a fixed interval; when a tick arrives much later than
//! scheduled, something held the loop without yielding.

use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};

/// How often the watchdog wakes up.
pub const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Lateness reported as a stall.
pub const STALL_THRESHOLD: Duration = Duration::from_millis(100);

/// Lateness of a tick, if it exceeds `threshold`.
pub fn stall(elapsed: Duration, interval: Duration, threshold: Duration) -> Option<Duration> {
    let late_by = elapsed.saturating_sub(interval);
    (late_by > threshold).then_some(late_by)
}

/// Run until the loop shuts down, logging every stall.
pub async fn watch(interval: Duration, threshold: Duration) {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    let mut last = Instant::now();
    loop {
        ticker.tick().await;
        let now = Instant::now();

        if let Some(late_by) = stall(now - last, interval, threshold) {
            tracing::warn!(
                blocked_ms = late_by.as_millis() as u64,
                threshold_ms = threshold.as_millis() as u64,
                "Event loop was blocked"
            );
        }
        last = now;
    }
}
