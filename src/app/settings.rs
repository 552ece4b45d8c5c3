//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and the popup renderer consume the same source of truth.

use super::state::AppState;
use crate::config::{AppConfig, SmoothingKind};

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Boolean toggle.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Toggle { label, .. } | Self::Cycle { label, .. } => label,
        }
    }

    /// Display value for the popup.
    pub fn value(&self, state: &AppState) -> String {
        match self {
            Self::Toggle { get, .. } => (if get(state) { "ON" } else { "OFF" }).to_string(),
            Self::Cycle { value, .. } => value(state),
        }
    }

    /// Apply the item (flip a toggle, advance a cycle).
    pub fn activate(&self, state: &mut AppState) {
        match self {
            Self::Toggle { get, set, .. } => {
                let current = get(state);
                set(state, !current);
            }
            Self::Cycle { cycle, .. } => cycle(state),
        }
    }
}

/// Index of `current` in `options` (nearest match for floats), or `fallback`.
fn position_of(options: &[f64], current: f64, fallback: usize) -> usize {
    options
        .iter()
        .position(|&o| (o - current).abs() < 1e-9)
        .unwrap_or(fallback)
}

/// Record one change in the on-disk preferences and write them out.
///
/// Only the change itself is saved; session overrides (command-line flags,
/// the quick smoothing toggle) never reach the file.
fn persist(state: &mut AppState, change: impl FnOnce(&mut AppConfig)) {
    change(&mut state.saved_config);
    if let Err(e) = state.saved_config.save() {
        tracing::warn!("could not save config: {e:#}");
    }
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Toggle {
        label: "Smooth Scrolling",
        get: |s| s.config.smoothing_enabled,
        set: |s, v| {
            s.set_smoothing_enabled(v);
            persist(s, |c| c.smoothing_enabled = v);
            s.status_message = Some(format!("Smoothing {}", if v { "on" } else { "off" }));
        },
    },
    SettingsItem::Cycle {
        label: "Mode",
        value: |s| s.config.smoothing_kind.label().to_string(),
        cycle: |s| {
            let idx = SmoothingKind::ALL
                .iter()
                .position(|k| *k == s.config.smoothing_kind)
                .unwrap_or(0);
            let kind = SmoothingKind::ALL[(idx + 1) % SmoothingKind::ALL.len()];
            s.config.smoothing_kind = kind;
            persist(s, |c| c.smoothing_kind = kind);
            s.rebuild_smoother();
            s.status_message = Some(format!("Mode: {}", s.config.smoothing_kind.label()));
        },
    },
    SettingsItem::Cycle {
        label: "Follow Factor",
        value: |s| format!("{:.2}", s.config.smoothing),
        cycle: |s| {
            const FACTORS: &[f64] = &[0.05, 0.1, 0.15, 0.25, 0.5, 1.0];
            let idx = position_of(FACTORS, s.config.smoothing, 0);
            let factor = FACTORS[(idx + 1) % FACTORS.len()];
            s.config.smoothing = factor;
            persist(s, |c| c.smoothing = factor);
            s.rebuild_smoother();
            s.status_message = Some(format!("Follow factor: {:.2}", s.config.smoothing));
        },
    },
    SettingsItem::Cycle {
        label: "Tween Duration",
        value: |s| format!("{:.1}s", s.config.duration_secs),
        cycle: |s| {
            const DURATIONS: &[f64] = &[0.3, 0.6, 1.0, 1.5, 2.0];
            let idx = position_of(DURATIONS, s.config.duration_secs, 1);
            let secs = DURATIONS[(idx + 1) % DURATIONS.len()];
            s.config.duration_secs = secs;
            persist(s, |c| c.duration_secs = secs);
            s.rebuild_smoother();
            s.status_message = Some(format!("Tween duration: {:.1}s", s.config.duration_secs));
        },
    },
    SettingsItem::Cycle {
        label: "Wheel Step",
        value: |s| format!("{} rows", s.config.wheel_lines),
        cycle: |s| {
            const STEPS: &[u16] = &[1, 2, 3, 5, 8];
            let idx = STEPS
                .iter()
                .position(|&w| w == s.config.wheel_lines)
                .unwrap_or(2);
            let step = STEPS[(idx + 1) % STEPS.len()];
            s.config.wheel_lines = step;
            persist(s, |c| c.wheel_lines = step);
            s.status_message = Some(format!("Wheel step: {} rows", s.config.wheel_lines));
        },
    },
];
