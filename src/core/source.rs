//! Position source: where the page *should* be scrolled to.

use super::trigger::{ScrollProgressSource, ScrollTrigger};

/// How native scroll notifications become a target offset.
#[derive(Debug, Clone)]
pub enum PositionSource {
    /// Target follows the native offset directly.
    Events,
    /// Target is derived from a trigger's progress over the whole page.
    Progress(ScrollTrigger),
}

impl PositionSource {
    /// Progress-driven source over the full page (`0 → max`).
    pub fn progress() -> Self {
        Self::Progress(ScrollTrigger::page())
    }

    /// Handle one native scroll notification.  Returns the new target, or
    /// `None` when the notification does not move it.
    pub fn on_native_scroll(&mut self, native_offset: f64, extent: f64) -> Option<f64> {
        match self {
            Self::Events => Some(native_offset),
            Self::Progress(trigger) => trigger
                .observe(native_offset, extent)
                .map(|update| target_from_progress(update.progress, extent)),
        }
    }

    /// Target for new page geometry.  Unlike [`Self::on_native_scroll`] this
    /// always answers: an unchanged progress still maps to a new offset when
    /// the extent moved.
    pub fn relayout(&mut self, native_offset: f64, extent: f64) -> f64 {
        match self {
            Self::Events => native_offset,
            Self::Progress(trigger) => {
                trigger.observe(native_offset, extent);
                target_from_progress(trigger.progress(), extent)
            }
        }
    }

    /// Forget previous observations (direction, last progress) and prime the
    /// source at `native_offset`.
    pub fn reset(&mut self, native_offset: f64, extent: f64) {
        if let Self::Progress(trigger) = self {
            *trigger = ScrollTrigger::page();
            trigger.observe(native_offset, extent);
        }
    }
}

/// `progress × extent`, or `0` when there is nothing to scroll.
pub fn target_from_progress(progress: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    progress.clamp(0.0, 1.0) * extent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_mode_passes_native_offset_through() {
        let mut src = PositionSource::Events;
        assert_eq!(src.on_native_scroll(42.0, 100.0), Some(42.0));
    }

    #[test]
    fn progress_mode_scales_by_extent() {
        let mut src = PositionSource::progress();
        src.reset(0.0, 1000.0);
        let target = src.on_native_scroll(370.0, 1000.0).expect("progress moved");
        assert!((target - 370.0).abs() < 1e-9);
    }

    #[test]
    fn relayout_rescales_unchanged_progress() {
        let mut src = PositionSource::progress();
        src.reset(720.0, 720.0);
        // Still at the bottom, so progress stays 1 and no update is emitted.
        assert_eq!(src.on_native_scroll(360.0, 360.0), None);
        assert_eq!(src.relayout(360.0, 360.0), 360.0);

        let mut events = PositionSource::Events;
        assert_eq!(events.relayout(12.0, 360.0), 12.0);
    }

    #[test]
    fn zero_extent_pins_target_to_zero() {
        for progress in [0.0, 0.37, 1.0, 4.0] {
            assert_eq!(target_from_progress(progress, 0.0), 0.0);
            assert_eq!(target_from_progress(progress, -50.0), 0.0);
        }
        let mut src = PositionSource::progress();
        src.reset(0.0, 0.0);
        assert_eq!(src.on_native_scroll(12.0, 0.0).unwrap_or(0.0), 0.0);
    }
}
