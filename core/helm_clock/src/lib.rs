//! Time source for the Helm input layer.
//!
//! The control loop only ever asks "how many milliseconds since boot", so the
//! capability exposed to the rest of the workspace is the tiny [`Clock`] trait.
//! [`BoardClock`] is the monotonic implementation; [`BoardClock::mock`] gives a
//! clock whose time only moves when the paired [`BoardClockMock`] says so.

use quanta::{Clock as QuantaClock, Instant, Mock};
use std::sync::Arc;
use std::time::Duration;

/// Monotonic milliseconds since an arbitrary epoch.
pub trait Clock {
    fn millis(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn millis(&self) -> u64 {
        (**self).millis()
    }
}

/// A running board clock.
/// It is clone resilient: a clone reads the same time, even when mocked.
#[derive(Clone, Debug)]
pub struct BoardClock {
    inner: QuantaClock,
    ref_time: Instant,
}

/// Handle driving every clone of a mocked [`BoardClock`].
#[derive(Clone, Debug)]
pub struct BoardClockMock(Arc<Mock>);

impl BoardClockMock {
    pub fn increment(&self, amount: Duration) {
        self.0.increment(amount);
    }

    pub fn increment_ms(&self, ms: u64) {
        self.increment(Duration::from_millis(ms));
    }

    /// Current mocked time in nanoseconds.
    pub fn value(&self) -> u64 {
        self.0.value()
    }
}

impl BoardClock {
    /// Creates a clock whose epoch is now.
    pub fn new() -> Self {
        let inner = QuantaClock::new();
        let ref_time = inner.now();
        BoardClock { inner, ref_time }
    }

    /// Builds a fake clock starting at 0.
    pub fn mock() -> (Self, BoardClockMock) {
        let (inner, mock) = QuantaClock::mock();
        let ref_time = inner.now();
        (BoardClock { inner, ref_time }, BoardClockMock(mock))
    }

    /// Elapsed time since the epoch.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.inner.now() - self.ref_time
    }
}

impl Default for BoardClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for BoardClock {
    #[inline]
    fn millis(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }
}
