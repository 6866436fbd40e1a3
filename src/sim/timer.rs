//! Frame-clock driven repeating tasks
//!
//! Spawn timers are polled from the animation frame instead of being
//! self-rescheduling browser timeouts, so they can be suspended with the loop
//! and cancelled through a shared handle.

use rand::Rng;
use std::cell::Cell;
use std::rc::Rc;

/// Shared cancellation flag for a task
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// A task that fires once per random delay, forever, until cancelled
#[derive(Debug, Clone)]
pub struct RepeatingTask {
    /// Half-open delay range (ms)
    delay_ms: (f64, f64),
    next_due_ms: Option<f64>,
    suspended_at: Option<f64>,
    cancel: CancelHandle,
}

impl RepeatingTask {
    pub fn new(delay_ms: (f64, f64)) -> Self {
        Self {
            delay_ms,
            next_due_ms: None,
            suspended_at: None,
            cancel: CancelHandle::default(),
        }
    }

    /// Arm the task; the first firing is one delay after `now_ms`
    pub fn start<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) {
        self.schedule(now_ms, rng);
    }

    fn schedule<R: Rng + ?Sized>(&mut self, from_ms: f64, rng: &mut R) {
        let (lo, hi) = self.delay_ms;
        self.next_due_ms = Some(from_ms + lo + rng.random::<f64>() * (hi - lo));
    }

    /// Returns true if the task fired; it is then rescheduled from `now_ms`
    pub fn poll<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) -> bool {
        if !self.is_active() {
            return false;
        }
        match self.next_due_ms {
            Some(due) if now_ms >= due => {
                self.schedule(now_ms, rng);
                true
            }
            _ => false,
        }
    }

    /// Stop the clock; time until the next firing is preserved
    pub fn suspend(&mut self, now_ms: f64) {
        if self.suspended_at.is_none() {
            self.suspended_at = Some(now_ms);
        }
    }

    /// Restart the clock, pushing the deadline back by the suspended time
    pub fn resume(&mut self, now_ms: f64) {
        if let Some(since) = self.suspended_at.take() {
            if let Some(due) = self.next_due_ms.as_mut() {
                *due += (now_ms - since).max(0.0);
            }
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended_at.is_some()
    }

    /// Armed, not cancelled and not suspended
    pub fn is_active(&self) -> bool {
        self.next_due_ms.is_some() && !self.cancel.is_cancelled() && !self.is_suspended()
    }

    pub fn next_due_ms(&self) -> Option<f64> {
        self.next_due_ms
    }
}

/// A fixed number of events spaced at a fixed interval
#[derive(Debug, Clone)]
pub struct Burst {
    remaining: u32,
    next_ms: f64,
    spacing_ms: f64,
}

impl Burst {
    /// First event is due at `start_ms`
    pub fn new(count: u32, start_ms: f64, spacing_ms: f64) -> Self {
        Self {
            remaining: count,
            next_ms: start_ms,
            spacing_ms,
        }
    }

    /// Number of events due by `now_ms` (consumed)
    pub fn drain_due(&mut self, now_ms: f64) -> u32 {
        let mut due = 0;
        while self.remaining > 0 && now_ms >= self.next_ms {
            self.remaining -= 1;
            self.next_ms += self.spacing_ms;
            due += 1;
        }
        due
    }

    /// Shift the remaining schedule (used when resuming)
    pub fn delay(&mut self, by_ms: f64) {
        self.next_ms += by_ms.max(0.0);
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }
}
