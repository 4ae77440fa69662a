//! Monotonic time sources for the hybrid store.
//!
//! The hybrid policy scores entries by the time elapsed since their last
//! access. Reading time goes through the [`Clock`] trait so tests can drive
//! it deterministically with [`ManualClock`] while production code uses
//! [`MonotonicClock`].
//!
//! ```
//! use evictkit::clock::{Clock, ManualClock};
//!
//! let clock = ManualClock::new();
//! let handle = clock.clone();
//! handle.advance(25);
//! assert_eq!(clock.now_millis(), 25);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Read-only monotonic time source, in milliseconds.
///
/// Readings must never decrease. The origin is arbitrary; only differences
/// between readings are meaningful.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

/// Wall-independent clock backed by [`Instant`], anchored at construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Hand-driven clock. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Starts at 0 ms.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(millis: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(millis)),
        }
    }

    /// Moves time forward by `millis`.
    pub fn advance(&self, millis: u64) {
        let _ = self
            .now
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |now| {
                Some(now.saturating_add(millis))
            });
    }

    /// Jumps to `millis`. Ignored if that would move time backwards.
    pub fn set(&self, millis: u64) {
        self.now.fetch_max(millis, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}
