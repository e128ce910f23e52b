//! Wall-clock abstraction for testability
//!
//! Session revalidation compares "now" against the last validation time;
//! injecting the clock lets tests move time forward without sleeping.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use conex_common::time::{Clock, MockClock};
//!
//! let clock = MockClock::new();
//! let start = clock.now();
//! clock.advance(Duration::from_secs(301));
//! assert_eq!((clock.now() - start).num_seconds(), 301);
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Source of the current UTC time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Time elapsed since `earlier`; zero if `earlier` lies in the future.
    fn since(&self, earlier: DateTime<Utc>) -> Duration {
        (self.now() - earlier).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock
///
/// Clones share the same time, so a test can keep one handle while the code
/// under test holds another.
#[cfg(feature = "runtime")]
#[derive(Debug, Clone)]
pub struct MockClock {
    current: Arc<parking_lot::Mutex<DateTime<Utc>>>,
}

#[cfg(feature = "runtime")]
impl MockClock {
    /// Start at the current real time
    #[must_use]
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Start at a fixed instant
    #[must_use]
    pub fn at(start: DateTime<Utc>) -> Self {
        Self { current: Arc::new(parking_lot::Mutex::new(start)) }
    }

    /// Simulate time passing.
    pub fn advance(&self, duration: Duration) {
        let step = chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::MAX);
        let mut current = self.current.lock();
        *current = current.checked_add_signed(step).unwrap_or(DateTime::<Utc>::MAX_UTC);
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current.lock() = instant;
    }
}

#[cfg(feature = "runtime")]
impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "runtime")]
impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}

/// Shared handle to a clock
pub type SharedClock = Arc<dyn Clock>;
