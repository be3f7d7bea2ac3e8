//! Millisecond clocks
//!
//! Every state transition in the arcade receives `now_ms` explicitly.
//! A [`Clock`] is how a front end obtains that value: the browser reads
//! `performance.now()`, simulations and tests step a [`ManualClock`].

use serde::{Deserialize, Serialize};

/// Source of monotonic millisecond timestamps
pub trait Clock {
    /// Current time in milliseconds since an arbitrary origin
    fn now_ms(&self) -> f64;
}

/// Hand-stepped clock for simulations and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualClock {
    current_ms: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a given timestamp
    pub fn starting_at(ms: f64) -> Self {
        Self { current_ms: ms }
    }

    /// Advance by duration and return the new timestamp
    pub fn advance(&mut self, duration_ms: f64) -> f64 {
        self.current_ms += duration_ms.max(0.0);
        self.current_ms
    }

    /// Jump to an absolute timestamp; never moves backwards
    pub fn set(&mut self, ms: f64) {
        self.current_ms = self.current_ms.max(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.current_ms
    }
}

/// Round a millisecond span to whole milliseconds, clamping negatives to zero
#[inline]
pub fn whole_ms(span_ms: f64) -> u32 {
    if span_ms.is_finite() && span_ms > 0.0 {
        span_ms.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}
