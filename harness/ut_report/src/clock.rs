//! Millisecond clock capability.
//!
//! The engine never owns a time source. A [`Clock`] is handed to each run so
//! tests can substitute a scripted one.

use std::time::Instant;

/// A zero-argument source of the current time in whole milliseconds.
///
/// Any `Fn() -> u64` is a clock, which keeps deterministic test clocks to a
/// one-line closure over a `Cell`.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

impl<F> Clock for F
where
    F: Fn() -> u64,
{
    fn now_millis(&self) -> u64 {
        self()
    }
}

/// Monotonic clock measuring milliseconds since its creation.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
