use std::time::{Duration, Instant};

/// Repeating deadline driven from the event loop.
///
/// The event loop sleeps until [`Ticker::deadline`] and then asks
/// [`Ticker::fire`] whether a tick is due. A fired tick re-arms from the time
/// it was handled, so slow steps delay the next one instead of piling up.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arms the ticker one period after `now`. A deadline past the end of
    /// the clock leaves it disarmed.
    pub fn start(&mut self, now: Instant) {
        self.deadline = now.checked_add(self.interval);
        if self.deadline.is_none() {
            log::warn!("Tick interval {:?} overflows the clock, timer not armed", self.interval);
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Replaces the period. An armed ticker is cancelled and restarted from `now`.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        if self.is_armed() {
            self.start(now);
        }
    }

    /// Returns `true` when the deadline has passed and re-arms for the next period.
    /// Missed periods are not replayed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.start(now);
                true
            }
            _ => false,
        }
    }
}
