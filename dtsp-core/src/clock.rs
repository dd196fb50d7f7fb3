//! Injectable time source so the engine's rotation schedule is testable
//! without sleeping real seconds.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of wall-clock time, in whole seconds since the Unix epoch.
pub trait Clock: Send + Sync {
    /// Current time, in seconds.
    fn now(&self) -> u32;
}

/// Reads the real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u32 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0)
    }
}

/// A clock driven explicitly by tests.
#[derive(Debug, Default)]
pub struct FixedClock(AtomicU32);

impl FixedClock {
    /// Create a clock starting at `seconds`.
    pub fn new(seconds: u32) -> Self {
        Self(AtomicU32::new(seconds))
    }

    /// Advance the clock by `delta` seconds.
    pub fn advance(&self, delta: u32) {
        self.0.fetch_add(delta, Ordering::SeqCst);
    }

    /// Set the clock to an absolute time.
    pub fn set(&self, seconds: u32) {
        self.0.store(seconds, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances() {
        let clock = FixedClock::new(100);
        assert_eq!(clock.now(), 100);
        clock.advance(15);
        assert_eq!(clock.now(), 115);
        clock.set(0);
        assert_eq!(clock.now(), 0);
    }
}
