//! Input handling: maps key/mouse events to state mutations.
//!
//! Every scroll input is a *native* scroll: it moves `native_offset` the way
//! a browser would move its scroll position, and the smoother (if running)
//! takes it from there.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::config::Action;

use super::settings::SETTINGS_ITEMS;
use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Page => handle_page_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
    }
}

/// Mouse wheel scrolls the page.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Page {
        return;
    }
    let step = state.config.wheel_lines as f64;
    match mouse.kind {
        MouseEventKind::ScrollDown => state.scroll_native_by(step),
        MouseEventKind::ScrollUp => state.scroll_native_by(-step),
        _ => {}
    }
}

// ── Page view (configurable bindings) ───────────────────────────

fn handle_page_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;

    let line = state.config.wheel_lines as f64;
    // A page keeps one row of context, like browsers do.
    let page = (state.viewport.height() as f64 - 1.0).max(1.0);

    match action {
        Action::ScrollUp => state.scroll_native_by(-line),
        Action::ScrollDown => state.scroll_native_by(line),
        Action::PageUp => state.scroll_native_by(-page),
        Action::PageDown => state.scroll_native_by(page),
        Action::Top => state.scroll_native_to(0.0),
        Action::Bottom => state.scroll_native_to(f64::MAX),
        Action::ToggleSmoothing => {
            let enabled = !state.config.smoothing_enabled;
            state.set_smoothing_enabled(enabled);
            state.status_message = Some(format!(
                "Smoothing {} (not saved)",
                if enabled { "on" } else { "off" }
            ));
        }
        Action::OpenResume => {
            if state.config.resume_path.is_some() {
                state.open_resume = true;
                state.should_quit = true;
            } else {
                state.status_message = Some("No resume configured (--resume <PATH>)".into());
            }
        }
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::Quit => state.should_quit = true,
    }
}

// ── Settings menu ───────────────────────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    let count = SETTINGS_ITEMS.len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Page;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected + 1 < count {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right | KeyCode::Char('l') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                item.activate(state);
            }
        }
        _ => {}
    }
}
