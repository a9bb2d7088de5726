use std::cell::Cell;
use std::time::Duration;
use web_time::Instant;

/// Source of "now" for the game timer.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Reads the platform monotonic clock.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to, for deterministic timing.
#[derive(Clone, Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Cell::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}
