//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Instant;

use crate::config::AppConfig;
use crate::core::{
    clock::FrameScheduler,
    page::Page,
    smoother::{Mode, Smoother},
    surface::{ScrollSurface, Viewport},
    trigger::{ScrollProgressSource, ScrollTrigger},
};

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Page,
    SettingsMenu,
}

/// Top-level application state.
pub struct AppState {
    pub page: Page,
    /// The terminal viewport onto the page (the scroll surface).
    pub viewport: Viewport,
    /// Where raw input has scrolled to; what the smoother chases.
    pub native_offset: f64,
    pub smoother: Smoother,
    pub clock: FrameScheduler,
    /// Page-wide trigger observing the *visible* offset; scenes read its
    /// direction.
    pub page_trigger: ScrollTrigger,
    /// Effective settings for this session (file plus command-line flags).
    pub config: AppConfig,
    /// Preferences as stored on disk; settings changes are saved from here.
    pub saved_config: AppConfig,
    pub active_view: ActiveView,
    pub settings_selected: usize,
    pub should_quit: bool,
    /// When set on exit, the resume is opened after the terminal is restored.
    pub open_resume: bool,
    pub status_message: Option<String>,
    /// Frame ticks received (drives decorative motion like the pulse).
    pub frame_count: u64,
    /// Epoch for frame timestamps.
    pub started: Instant,
}

impl AppState {
    pub fn new(page: Page, config: AppConfig, mode: Mode) -> Self {
        Self {
            page,
            viewport: Viewport::new(),
            native_offset: 0.0,
            smoother: Smoother::new(mode),
            clock: FrameScheduler::new(),
            page_trigger: ScrollTrigger::page(),
            saved_config: config.clone(),
            config,
            active_view: ActiveView::default(),
            settings_selected: 0,
            should_quit: false,
            open_resume: false,
            status_message: None,
            frame_count: 0,
            started: Instant::now(),
        }
    }

    /// Preferences to save settings changes into, when they differ from the
    /// session's effective config.
    pub fn with_saved_config(mut self, saved: AppConfig) -> Self {
        self.saved_config = saved;
        self
    }

    /// Apply a layout pass: the page area is `rows` tall.
    ///
    /// Also the activation point: the smoother cannot start before the
    /// viewport has a size, so every layout retries a deferred activation.
    pub fn relayout(&mut self, rows: u16) {
        if rows != self.viewport.height() {
            let content = self.page.content_height(rows);
            self.viewport.resize(rows, content);
            self.native_offset = self.native_offset.clamp(0.0, self.viewport.max_offset() as f64);
            self.smoother.on_layout(
                self.viewport.offset(),
                self.native_offset,
                self.viewport.scrollable_extent(),
            );
            self.observe_visible();
        }
        if self.config.smoothing_enabled && !self.smoother.is_running() {
            self.smoother.activate(&mut self.clock, self.viewport.as_mounted());
        }
    }

    /// Native scroll to an absolute offset (clamped to the page).
    ///
    /// While the smoother runs the offset only becomes its target; otherwise
    /// the viewport jumps straight there.
    pub fn scroll_native_to(&mut self, offset: f64) {
        let max = self.viewport.max_offset() as f64;
        self.native_offset = offset.clamp(0.0, max);
        if self.smoother.is_running() {
            self.smoother
                .on_native_scroll(self.native_offset, self.viewport.scrollable_extent());
        } else {
            self.viewport.set_offset(self.native_offset);
            self.observe_visible();
        }
    }

    pub fn scroll_native_by(&mut self, rows: f64) {
        self.scroll_native_to(self.native_offset + rows);
    }

    /// A display tick at `at`.
    pub fn on_frame(&mut self, at: Instant) {
        self.frame_count = self.frame_count.wrapping_add(1);
        let Some(frame) = self.clock.fire(at.saturating_duration_since(self.started)) else {
            return;
        };
        if self
            .smoother
            .on_frame(frame, &mut self.clock, &mut self.viewport)
            .is_some()
        {
            self.observe_visible();
        }
    }

    fn observe_visible(&mut self) {
        self.page_trigger
            .observe(self.viewport.offset(), self.viewport.scrollable_extent());
    }

    /// Replace the smoother (settings changed).  The old one is disposed
    /// first; a smoothing factor is never mutated in place.
    pub fn rebuild_smoother(&mut self) {
        let mode = match self.config.mode() {
            Ok(mode) => mode,
            Err(e) => {
                tracing::warn!("keeping previous smoother: {e}");
                self.status_message = Some(e.to_string());
                return;
            }
        };
        self.smoother.dispose(&mut self.clock);
        self.smoother = Smoother::new(mode);
        self.native_offset = self.viewport.offset();
        if self.config.smoothing_enabled {
            self.smoother.activate(&mut self.clock, self.viewport.as_mounted());
        }
        tracing::info!(?mode, enabled = self.config.smoothing_enabled, "smoother rebuilt");
    }

    /// Turn smoothing on or off.  Off means native scrolling.
    pub fn set_smoothing_enabled(&mut self, enabled: bool) {
        self.config.smoothing_enabled = enabled;
        if enabled {
            self.native_offset = self.viewport.offset();
            self.smoother.activate(&mut self.clock, self.viewport.as_mounted());
        } else {
            self.smoother.dispose(&mut self.clock);
            // Land where input already points.
            self.viewport.set_offset(self.native_offset);
            self.observe_visible();
        }
    }

    /// One-line description of how scrolling behaves right now.
    pub fn smoother_summary(&self) -> String {
        if !self.smoother.is_running() {
            return "native scrolling".into();
        }
        match self.smoother.mode() {
            Mode::Follow { factor } => format!("follow, factor {factor:.2}"),
            Mode::Tween { duration, ease } => {
                format!("tween, {:.1}s {}", duration.as_secs_f64(), ease.name())
            }
        }
    }

    /// Stop everything that writes to the viewport.
    pub fn teardown(&mut self) {
        self.smoother.dispose(&mut self.clock);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn state(enabled: bool) -> AppState {
        let mut config = AppConfig::default();
        config.smoothing_enabled = enabled;
        AppState::new(Page::portfolio(), config, Mode::follow(0.5).unwrap())
    }

    #[test]
    fn activation_waits_for_layout() {
        let mut s = state(true);
        s.scroll_native_by(10.0);
        assert!(!s.smoother.is_running());
        s.relayout(20);
        assert!(s.smoother.is_running());
    }

    #[test]
    fn smoothed_scroll_glides_toward_native_offset() {
        let mut s = state(true);
        s.relayout(20);
        s.scroll_native_to(100.0);
        assert_eq!(s.viewport.row_offset(), 0);

        let t0 = s.started;
        s.on_frame(t0 + Duration::from_millis(16));
        assert_eq!(s.viewport.row_offset(), 50);
        s.on_frame(t0 + Duration::from_millis(32));
        assert_eq!(s.viewport.row_offset(), 75);
        for n in 3..40 {
            s.on_frame(t0 + Duration::from_millis(16 * n));
        }
        assert_eq!(s.viewport.row_offset(), 100);
    }

    #[test]
    fn native_scroll_when_smoothing_disabled() {
        let mut s = state(false);
        s.relayout(20);
        assert!(!s.smoother.is_running());
        s.scroll_native_to(42.0);
        assert_eq!(s.viewport.row_offset(), 42);
    }

    #[test]
    fn native_offset_is_clamped_to_page() {
        let mut s = state(false);
        s.relayout(20);
        s.scroll_native_by(-50.0);
        assert_eq!(s.native_offset, 0.0);
        s.scroll_native_by(1e9);
        assert_eq!(s.native_offset, s.viewport.max_offset() as f64);
    }

    #[test]
    fn disabling_smoothing_jumps_to_native_and_stops_frames() {
        let mut s = state(true);
        s.relayout(20);
        s.scroll_native_to(80.0);
        s.set_smoothing_enabled(false);
        assert_eq!(s.viewport.row_offset(), 80);
        assert!(!s.clock.is_armed());

        s.scroll_native_to(10.0);
        s.on_frame(s.started + Duration::from_millis(16));
        assert_eq!(s.viewport.row_offset(), 10);
    }

    #[test]
    fn teardown_leaves_viewport_alone() {
        let mut s = state(true);
        s.relayout(20);
        s.scroll_native_to(100.0);
        s.teardown();
        s.scroll_native_to(200.0);
        for n in 1..10 {
            s.on_frame(s.started + Duration::from_millis(16 * n));
        }
        // Not running: the scroll above went native, frames wrote nothing.
        assert_eq!(s.viewport.row_offset(), 200);
    }

    #[test]
    fn rebuild_restarts_from_visible_offset() {
        let mut s = state(true);
        s.relayout(20);
        s.scroll_native_to(100.0);
        s.on_frame(s.started + Duration::from_millis(16));
        s.config.smoothing = 0.25;
        s.rebuild_smoother();
        assert!(s.smoother.is_running());
        assert_eq!(s.smoother.current(), 50.0);
        assert_eq!(s.native_offset, 50.0);
    }

    #[test]
    fn shrinking_while_running_keeps_smoother_in_step() {
        for mode in [Mode::follow(0.5).unwrap(), Mode::tween(0.2).unwrap()] {
            let mut s = AppState::new(Page::portfolio(), AppConfig::default(), mode);
            s.relayout(40);
            s.scroll_native_to(f64::MAX);
            let t0 = s.started;
            for n in 1..=120 {
                s.on_frame(t0 + Duration::from_millis(16 * n));
            }
            assert_eq!(s.viewport.row_offset(), 720, "{mode:?}");

            s.relayout(20);
            assert_eq!(s.viewport.row_offset(), 360, "{mode:?}");
            assert!(s.smoother.current() <= 360.0, "{mode:?}");
            assert_eq!(s.smoother.target(), 360.0, "{mode:?}");

            // Scrolling up moves the page within a few frames.
            s.scroll_native_by(-3.0);
            let moved = (121..131).any(|n| {
                s.on_frame(t0 + Duration::from_millis(16 * n));
                s.viewport.row_offset() < 360
            });
            assert!(moved, "{mode:?} stuck at the bottom");
        }
    }

    #[test]
    fn summary_reflects_mode_and_activation() {
        let mut s = state(true);
        assert_eq!(s.smoother_summary(), "native scrolling");
        s.relayout(20);
        assert_eq!(s.smoother_summary(), "follow, factor 0.50");
        s.config.smoothing_kind = crate::config::SmoothingKind::Tween;
        s.config.duration_secs = 1.5;
        s.rebuild_smoother();
        assert_eq!(s.smoother_summary(), "tween, 1.5s power2.out");
    }
}
