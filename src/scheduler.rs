//! Frame loop driver
//!
//! A two-state machine (Running / Paused) over an abstract frame requester.
//! In the browser the requester is `requestAnimationFrame`; tests use a mock.
//!
//! At most one frame request is pending at any time, so a resume that races
//! with an in-flight frame never starts a second chain.

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Paused,
}

/// Source of display-refresh callbacks
pub trait FrameRequester {
    type Handle;

    /// Ask for one callback on the next display refresh
    fn request_frame(&mut self) -> Option<Self::Handle>;

    /// Drop a pending request
    fn cancel_frame(&mut self, handle: Self::Handle);
}

pub struct FrameLoop<R: FrameRequester> {
    requester: R,
    state: LoopState,
    pending: Option<R::Handle>,
    frames: u64,
}

impl<R: FrameRequester> FrameLoop<R> {
    pub fn new(requester: R) -> Self {
        Self {
            requester,
            state: LoopState::Paused,
            pending: None,
            frames: 0,
        }
    }

    /// Enter Running and request the first frame
    pub fn start(&mut self) {
        log::info!("Frame loop started");
        self.state = LoopState::Running;
        self.request();
    }

    /// Enter Paused and cancel the in-flight request
    pub fn pause(&mut self) {
        if self.state == LoopState::Paused {
            return;
        }
        self.state = LoopState::Paused;
        if let Some(handle) = self.pending.take() {
            self.requester.cancel_frame(handle);
        }
        log::info!("Frame loop paused after {} frames", self.frames);
    }

    /// Enter Running; no-op if a frame is already pending
    pub fn resume(&mut self) {
        self.state = LoopState::Running;
        if self.pending.is_none() {
            log::info!("Frame loop resumed");
            self.request();
        }
    }

    /// Page visibility hook
    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Handle a delivered frame callback: run one step while Running, then
    /// request the next frame.
    pub fn on_frame<F: FnOnce()>(&mut self, step: F) {
        self.pending = None;
        if self.state != LoopState::Running {
            return;
        }
        self.frames += 1;
        step();
        self.request();
    }

    fn request(&mut self) {
        if self.pending.is_none() {
            self.pending = self.requester.request_frame();
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Frames stepped since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn requester(&self) -> &R {
        &self.requester
    }

    pub fn requester_mut(&mut self) -> &mut R {
        &mut self.requester
    }
}
