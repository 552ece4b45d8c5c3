//! Frame clock: "run this once on the next rendered frame".
//!
//! The clock hands out one [`FrameHandle`] per request.  A consumer that wants
//! a continuous loop re-requests from inside its own step, the same way a
//! browser `requestAnimationFrame` callback re-registers itself.  The host
//! drives the clock by calling [`FrameScheduler::fire`] once per display tick.

use std::time::Duration;

/// Identifies one pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// A fired frame: which request it satisfies and when it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub handle: FrameHandle,
    /// Time since the clock's epoch.
    pub now: Duration,
}

/// Schedule and cancel per-frame callbacks.
pub trait FrameClock {
    /// Arm one invocation on the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Disarm `handle`.  No frame for it is delivered after this returns,
    /// even if a tick was already in flight.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Single-slot scheduler: at most one request is armed at a time, and each
/// tick delivers it at most once.
///
/// Requesting again before the tick fires replaces the armed handle, so a
/// stale handle never fires.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    armed: Option<FrameHandle>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver the armed request, if any, for a tick at `now`.
    ///
    /// The slot is emptied: the consumer must request again to keep looping.
    pub fn fire(&mut self, now: Duration) -> Option<Frame> {
        let handle = self.armed.take()?;
        Some(Frame { handle, now })
    }

    /// Whether a request is currently armed.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

impl FrameClock for FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = FrameHandle(self.next_id);
        self.armed = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.armed == Some(handle) {
            self.armed = None;
        }
    }
}
