//! Pointer and resize event shaping
//!
//! Browser events arrive at arbitrary rates. These types reduce them to the
//! values the frame loop reads once per frame.

use glam::Vec2;

use crate::consts::{POINTER_THROTTLE_MS, RESIZE_DEBOUNCE_MS};

/// Last-write-wins pointer position with a leading-edge throttle.
///
/// Moves inside the throttle window are kept as a trailing value and
/// applied at the next frame boundary, so the final position is never lost.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    current: Option<Vec2>,
    trailing: Option<Vec2>,
    last_accepted_ms: Option<f64>,
    throttle_ms: f64,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(POINTER_THROTTLE_MS)
    }
}

impl PointerTracker {
    pub fn new(throttle_ms: f64) -> Self {
        Self {
            current: None,
            trailing: None,
            last_accepted_ms: None,
            throttle_ms,
        }
    }

    /// Record a pointer move. Returns true if it was applied immediately.
    pub fn on_move(&mut self, pos: Vec2, now_ms: f64) -> bool {
        let open = match self.last_accepted_ms {
            Some(last) => now_ms - last >= self.throttle_ms,
            None => true,
        };
        if open {
            self.current = Some(pos);
            self.trailing = None;
            self.last_accepted_ms = Some(now_ms);
        } else {
            self.trailing = Some(pos);
        }
        open
    }

    /// Pointer left the page; repulsion stops
    pub fn on_leave(&mut self) {
        self.current = None;
        self.trailing = None;
    }

    /// Apply any trailing move and return the position for this frame
    pub fn flush(&mut self, now_ms: f64) -> Option<Vec2> {
        if let Some(pos) = self.trailing.take() {
            self.current = Some(pos);
            self.last_accepted_ms = Some(now_ms);
        }
        self.current
    }

    /// Position currently visible to the frame loop
    pub fn position(&self) -> Option<Vec2> {
        self.current
    }
}

/// Applies a resize only after events have been quiet for the debounce window
#[derive(Debug, Clone)]
pub struct ResizeDebounce {
    pending: Option<(u32, u32)>,
    deadline_ms: f64,
    delay_ms: f64,
}

impl Default for ResizeDebounce {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE_MS)
    }
}

impl ResizeDebounce {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            pending: None,
            deadline_ms: 0.0,
            delay_ms,
        }
    }

    /// Record a resize event; restarts the quiet window
    pub fn on_resize(&mut self, width: u32, height: u32, now_ms: f64) {
        self.pending = Some((width, height));
        self.deadline_ms = now_ms + self.delay_ms;
    }

    /// The settled size, once the quiet window has passed
    pub fn poll(&mut self, now_ms: f64) -> Option<(u32, u32)> {
        if now_ms >= self.deadline_ms {
            self.pending.take()
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_applies_immediately() {
        let mut tracker = PointerTracker::default();
        assert_eq!(tracker.position(), None);
        assert!(tracker.on_move(Vec2::new(10.0, 20.0), 0.0));
        assert_eq!(tracker.position(), Some(Vec2::new(10.0, 20.0)));
    }

    #[test]
    fn test_throttled_moves_keep_latest_for_frame() {
        let mut tracker = PointerTracker::default();
        tracker.on_move(Vec2::new(1.0, 1.0), 0.0);
        assert!(!tracker.on_move(Vec2::new(2.0, 2.0), 5.0));
        assert!(!tracker.on_move(Vec2::new(3.0, 3.0), 10.0));

        // Not yet visible
        assert_eq!(tracker.position(), Some(Vec2::new(1.0, 1.0)));
        // Frame boundary applies the most recent value
        assert_eq!(tracker.flush(12.0), Some(Vec2::new(3.0, 3.0)));
    }

    #[test]
    fn test_window_reopens_after_throttle() {
        let mut tracker = PointerTracker::new(16.0);
        tracker.on_move(Vec2::ZERO, 0.0);
        assert!(!tracker.on_move(Vec2::ONE, 15.9));
        assert!(tracker.on_move(Vec2::new(5.0, 5.0), 16.0));
        assert_eq!(tracker.flush(17.0), Some(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_leave_clears_pointer() {
        let mut tracker = PointerTracker::default();
        tracker.on_move(Vec2::ONE, 0.0);
        tracker.on_move(Vec2::ZERO, 1.0);
        tracker.on_leave();
        assert_eq!(tracker.flush(2.0), None);
    }

    #[test]
    fn test_resize_waits_for_quiet_window() {
        let mut debounce = ResizeDebounce::new(150.0);
        debounce.on_resize(800, 600, 0.0);
        debounce.on_resize(900, 700, 100.0);
        assert_eq!(debounce.poll(200.0), None);
        assert!(debounce.is_pending());
        assert_eq!(debounce.poll(250.0), Some((900, 700)));
        assert_eq!(debounce.poll(400.0), None);
    }
}
