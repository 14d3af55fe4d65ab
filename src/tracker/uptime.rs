use crate::safe_lock;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct ClockState {
    accumulated: Duration,
    running_since: Option<Instant>,
}

/// Total time spent with GameMaker open, summed over sessions.
///
/// Clones share the same clock: the tracker thread starts and stops it while
/// the console reads it.
#[derive(Debug, Clone, Default)]
pub struct UptimeClock {
    state: Arc<Mutex<ClockState>>,
}

impl UptimeClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        self.start_at(Instant::now());
    }

    pub fn stop(&self) {
        self.stop_at(Instant::now());
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    pub fn is_running(&self) -> bool {
        safe_lock(&self.state, "Uptime").running_since.is_some()
    }

    pub(crate) fn start_at(&self, now: Instant) {
        let mut state = safe_lock(&self.state, "Uptime");
        if state.running_since.is_none() {
            state.running_since = Some(now);
        }
    }

    pub(crate) fn stop_at(&self, now: Instant) {
        let mut state = safe_lock(&self.state, "Uptime");
        if let Some(since) = state.running_since.take() {
            state.accumulated += now.saturating_duration_since(since);
        }
    }

    pub(crate) fn elapsed_at(&self, now: Instant) -> Duration {
        let state = safe_lock(&self.state, "Uptime");
        let current = state
            .running_since
            .map_or(Duration::ZERO, |since| now.saturating_duration_since(since));
        state.accumulated + current
    }
}

/// Format as `HH:MM:SS`; hours keep counting past a day.
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
