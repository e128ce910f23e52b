//! Time utilities

pub mod clock;

#[cfg(feature = "runtime")]
pub use clock::MockClock;
pub use clock::{Clock, SharedClock, SystemClock};
