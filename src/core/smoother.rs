//! Frame-driven scroll smoothing.
//!
//! The [`Smoother`] keeps two offsets: the *target* (where input says the page
//! should be) and the *current* offset (what the viewport shows).  Every frame
//! it moves current toward target and jumps the surface to the rounded
//! result.  Many small jumps read as one smooth glide.
//!
//! Two modes:
//!
//! * **Follow**: target tracks native scroll events; each frame closes a fixed
//!   fraction of the remaining gap (exponential approach, never overshoots).
//! * **Tween**: target comes from page-wide scroll progress; a new eased
//!   approach is started only when the target moves more than [`DEADBAND`]
//!   rows away.

use std::time::Duration;

use thiserror::Error;

use super::clock::{Frame, FrameClock, FrameHandle};
use super::ease::{lerp, Ease};
use super::source::PositionSource;
use super::surface::ScrollSurface;

/// Minimum gap (rows) that starts a new approach in tween mode.
pub const DEADBAND: f64 = 1.0;

/// Invalid smoother configuration.
#[derive(Debug, Error, PartialEq)]
pub enum SmootherError {
    #[error("smoothing factor must be in (0, 1], got {0}")]
    FactorOutOfRange(f64),
    #[error("tween duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),
}

/// Interpolation strategy, fixed for the lifetime of a [`Smoother`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Close `factor` of the remaining gap per frame.
    Follow { factor: f64 },
    /// Eased approach over `duration`, restarted on each new target.
    Tween { duration: Duration, ease: Ease },
}

impl Mode {
    pub fn follow(factor: f64) -> Result<Self, SmootherError> {
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(SmootherError::FactorOutOfRange(factor));
        }
        Ok(Self::Follow { factor })
    }

    /// `power2.out` tween lasting `seconds`.
    pub fn tween(seconds: f64) -> Result<Self, SmootherError> {
        if !(seconds.is_finite() && seconds > 0.0) {
            return Err(SmootherError::InvalidDuration(seconds));
        }
        Ok(Self::Tween {
            duration: Duration::from_secs_f64(seconds),
            ease: Ease::Power2Out,
        })
    }

    /// Swap the approach curve of a tween; follow mode has none.
    pub fn with_ease(self, ease: Ease) -> Self {
        match self {
            Self::Tween { duration, .. } => Self::Tween { duration, ease },
            follow => follow,
        }
    }

    fn position_source(self) -> PositionSource {
        match self {
            Self::Follow { .. } => PositionSource::Events,
            Self::Tween { .. } => PositionSource::progress(),
        }
    }
}

/// One eased approach from `from` to `to`.
#[derive(Debug, Clone, Copy)]
struct Approach {
    from: f64,
    to: f64,
    start: Duration,
    duration: Duration,
    ease: Ease,
}

impl Approach {
    fn sample(&self, now: Duration) -> f64 {
        let elapsed = now.saturating_sub(self.start);
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        lerp(self.from, self.to, self.ease.apply(t))
    }

    fn is_done(&self, now: Duration) -> bool {
        now.saturating_sub(self.start) >= self.duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Running { frame: FrameHandle },
}

/// Owns current/target offsets and converges one toward the other per frame.
#[derive(Debug)]
pub struct Smoother {
    mode: Mode,
    source: PositionSource,
    state: State,
    current: f64,
    target: f64,
    /// Last value jumped to (rounded), to skip redundant writes at rest.
    last_written: Option<f64>,
    approach: Option<Approach>,
}

impl Smoother {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            source: mode.position_source(),
            state: State::Idle,
            current: 0.0,
            target: 0.0,
            last_written: None,
            approach: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Start the frame loop against `surface`.
    ///
    /// With no surface (not laid out yet) this is a no-op that returns
    /// `false`; the caller retries on a later activation.  Activating a
    /// running smoother does nothing.
    pub fn activate<C, S>(&mut self, clock: &mut C, surface: Option<&S>) -> bool
    where
        C: FrameClock + ?Sized,
        S: ScrollSurface + ?Sized,
    {
        if self.is_running() {
            return true;
        }
        let Some(surface) = surface else {
            tracing::debug!("smoother activation deferred: no scroll surface yet");
            return false;
        };

        let native = surface.offset();
        self.current = native;
        self.target = native;
        self.last_written = Some(native.round());
        self.approach = None;
        self.source.reset(native, surface.scrollable_extent());
        self.state = State::Running {
            frame: clock.request_frame(),
        };
        tracing::debug!(mode = ?self.mode, offset = native, "smoother running");
        true
    }

    /// Stop the frame loop and stop listening to scroll notifications.
    pub fn dispose<C: FrameClock + ?Sized>(&mut self, clock: &mut C) {
        if let State::Running { frame } = self.state {
            clock.cancel_frame(frame);
            tracing::debug!(offset = self.current, "smoother disposed");
        }
        self.state = State::Idle;
        self.approach = None;
    }

    /// Native scroll notification.  Ignored while idle.
    pub fn on_native_scroll(&mut self, native_offset: f64, extent: f64) {
        if !self.is_running() {
            return;
        }
        if let Some(target) = self.source.on_native_scroll(native_offset, extent) {
            self.target = target;
        }
    }

    /// Page geometry changed.  The surface may already have clamped itself
    /// to `visible`; an offset past the new end is pulled back to it, and the
    /// target is recomputed for the new `extent`.
    pub fn on_layout(&mut self, visible: f64, native_offset: f64, extent: f64) {
        if !self.is_running() {
            return;
        }
        if self.current > extent.max(0.0) {
            self.current = visible;
            self.last_written = Some(visible.round());
            self.approach = None;
        }
        self.target = self.source.relayout(native_offset, extent);
        tracing::debug!(to = self.target, current = self.current, extent, "smoother relayout");
    }

    /// Frame callback.  Steps once, writes at most once, and re-arms the
    /// clock.  Frames for a handle other than the one armed by this smoother
    /// (stale or cancelled) are ignored.
    ///
    /// Returns the offset written to `surface`, if any.
    pub fn on_frame<C, S>(&mut self, frame: Frame, clock: &mut C, surface: &mut S) -> Option<f64>
    where
        C: FrameClock + ?Sized,
        S: ScrollSurface + ?Sized,
    {
        match self.state {
            State::Running { frame: armed } if armed == frame.handle => {}
            _ => return None,
        }
        let written = self.step(frame.now, surface);
        self.state = State::Running {
            frame: clock.request_frame(),
        };
        written
    }

    fn step<S: ScrollSurface + ?Sized>(&mut self, now: Duration, surface: &mut S) -> Option<f64> {
        // Target is read once; updates landing mid-step wait for next frame.
        let target = self.target;
        let delta = target - self.current;

        let mut force = false;
        match self.mode {
            Mode::Follow { factor } => {
                self.current += delta * factor;
            }
            Mode::Tween { duration, ease } => {
                let gap = match self.approach {
                    Some(approach) => (approach.to - target).abs(),
                    None => delta.abs(),
                };
                if gap > DEADBAND {
                    tracing::debug!(from = self.current, to = target, "approach started");
                    self.approach = Some(Approach {
                        from: self.current,
                        to: target,
                        start: now,
                        duration,
                        ease,
                    });
                    force = true;
                }
                let approach = self.approach?;
                if approach.is_done(now) {
                    self.current = approach.to;
                    self.approach = None;
                } else {
                    self.current = approach.sample(now);
                }
            }
        }

        let rounded = self.current.round();
        if !force && self.last_written == Some(rounded) {
            return None;
        }
        surface.set_offset(rounded);
        self.last_written = Some(rounded);
        Some(rounded)
    }
}
