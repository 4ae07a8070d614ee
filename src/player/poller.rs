use super::POLL_INTERVAL;
use std::time::{Duration, Instant};

/// Gates progress sampling to once per second. The running flag is true
/// only while a sampling schedule is live; `start` on a running poller and
/// `stop` on a stopped one are no-ops, so there is never more than one
/// schedule.
pub struct ProgressPoller {
    running: bool,
    last_sample: Option<Instant>,
}

impl ProgressPoller {
    pub fn new() -> Self {
        ProgressPoller {
            running: false,
            last_sample: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        if !self.running {
            self.running = true;
            // Backdate the schedule so the first sample lands on the next
            // wake instead of a full interval out.
            self.last_sample = now.checked_sub(POLL_INTERVAL);
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last_sample = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True at most once per interval while running.
    pub fn due(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }

        match self.last_sample {
            Some(prev) if now.duration_since(prev) < POLL_INTERVAL => false,
            _ => {
                self.last_sample = Some(now);
                true
            }
        }
    }
}

impl Default for ProgressPoller {
    fn default() -> Self {
        Self::new()
    }
}

/// Completed share of the track, clamped to [0, 1]. `None` when the
/// duration is unknown or zero; no update is published for such a sample.
pub fn fraction(position: Duration, duration: Option<Duration>) -> Option<f64> {
    match duration {
        Some(total) if !total.is_zero() => {
            Some((position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0))
        }
        _ => None,
    }
}
