//! One-shot timers owned by controllers
//!
//! A controller holds at most one pending timer. Scheduling replaces (and
//! thereby cancels) whatever was pending, and a cancelled timer can never
//! fire: its handle is gone, so a late `fire_if_due` finds nothing.

/// Identity of one scheduled firing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerHandle {
    /// Monotonic per-timer sequence number
    pub generation: u64,
    /// Timestamp (ms) at which the timer fires
    pub deadline_ms: f64,
}

/// Owned, cancelable one-shot timer
#[derive(Debug, Clone, Default)]
pub struct OneShotTimer {
    pending: Option<TimerHandle>,
    generation: u64,
}

impl OneShotTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a firing `delay_ms` after `now_ms`, cancelling any pending one
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64) -> TimerHandle {
        if let Some(stale) = self.pending.take() {
            log::debug!("Timer #{} cancelled by reschedule", stale.generation);
        }
        self.generation += 1;
        let handle = TimerHandle {
            generation: self.generation,
            deadline_ms: now_ms + delay_ms.max(0.0),
        };
        self.pending = Some(handle);
        handle
    }

    /// Cancel the pending timer. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                log::debug!("Timer #{} cancelled", handle.generation);
                true
            }
            None => false,
        }
    }

    /// Consume the pending timer if its deadline has passed
    pub fn fire_if_due(&mut self, now_ms: f64) -> Option<TimerHandle> {
        match self.pending {
            Some(handle) if handle.deadline_ms <= now_ms => self.pending.take(),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Deadline of the pending timer
    pub fn deadline_ms(&self) -> Option<f64> {
        self.pending.map(|h| h.deadline_ms)
    }
}
