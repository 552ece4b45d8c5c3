//! A scroll-choreographed space portfolio in the terminal.
//!
//! Scroll with the wheel or the keyboard; a frame-driven smoother turns the
//! stepwise input into a glide.  Press `?` for settings.

mod app;
mod config;
mod core;
mod shell;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Alignment,
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::app::{
    event::{spawn_event_sources, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::config::{AppConfig, SmoothingKind, FPS_RANGE};
use crate::core::{page::Page, surface::ScrollSurface};
use crate::ui::{
    indicator::ScrollIndicator, layout::AppLayout, page_widget::PageWidget, popup,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Space portfolio with smooth scrolling")]
struct Cli {
    /// Smoothing mode: `follow` (chase scroll events) or `tween` (eased
    /// approach to page progress).
    #[arg(long, value_parser = parse_kind)]
    mode: Option<SmoothingKind>,

    /// Follow mode: fraction of the remaining distance closed per frame.
    #[arg(long)]
    smoothing: Option<f64>,

    /// Tween mode: approach duration in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Frame ticks per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Disable smoothing and scroll natively.
    #[arg(long)]
    native: bool,

    /// Resume file opened by the resume key.
    #[arg(long)]
    resume: Option<PathBuf>,
}

fn parse_kind(s: &str) -> Result<SmoothingKind, String> {
    SmoothingKind::parse(s).ok_or_else(|| format!("unknown mode `{s}` (expected follow or tween)"))
}

impl Cli {
    /// Command-line flags win over the config file.
    fn apply(self, config: &mut AppConfig) {
        if let Some(kind) = self.mode {
            config.smoothing_kind = kind;
        }
        if let Some(smoothing) = self.smoothing {
            config.smoothing = smoothing;
        }
        if let Some(duration) = self.duration {
            config.duration_secs = duration;
        }
        if let Some(fps) = self.fps {
            config.fps = fps.clamp(FPS_RANGE.0, FPS_RANGE.1);
        }
        if self.native {
            config.smoothing_enabled = false;
        }
        if self.resume.is_some() {
            config.resume_path = self.resume;
        }
    }
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());

    // Layout pass: size the viewport (and retry a deferred activation)
    // before anything reads the offset.
    state.relayout(layout.page_area.height);

    let offset = state.viewport.row_offset();
    if popup::fits(layout.page_area) {
        frame.render_widget(
            PageWidget::new(&state.page, offset)
                .direction(state.page_trigger.direction())
                .frame(state.frame_count),
            layout.page_area,
        );
        frame.render_widget(
            ScrollIndicator {
                offset,
                viewport_rows: state.viewport.height(),
                tick: state.frame_count,
            },
            layout.page_area,
        );
    } else {
        frame.render_widget(popup::TooSmallNotice, layout.page_area);
    }

    let hint = state.config.status_bar_hint();
    let left = match state.active_view {
        ActiveView::Page => state.status_message.as_deref().unwrap_or(&hint),
        ActiveView::SettingsMenu => "",
    };
    frame.render_widget(
        Paragraph::new(left).style(Theme::status_bar_style()),
        layout.status_area,
    );

    let scene = state
        .page
        .scene_at(offset, state.viewport.height())
        .and_then(|span| state.page.scene(span.index))
        .map_or("", |scene| scene.title);
    let position = format!(
        " {scene} | {} | {:.0}/{:.0} | {:>3.0}% ",
        state.smoother_summary(),
        state.viewport.offset(),
        state.viewport.scrollable_extent(),
        state.viewport.progress() * 100.0,
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(position, Theme::status_accent_style())))
            .alignment(Alignment::Right),
        layout.status_area,
    );

    if state.active_view == ActiveView::SettingsMenu {
        frame.render_widget(popup::SettingsPopup { state: &*state }, frame.area());
    }
}

fn dispatch(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Key(k) => handler::handle_key(state, k),
        AppEvent::Mouse(m) => handler::handle_mouse(state, m),
        // The next draw re-runs layout with the new size.
        AppEvent::Resize(_, _) => {}
        AppEvent::Frame(at) => state.on_frame(at),
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Quiet unless RUST_LOG is set.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let saved = AppConfig::load();
    let mut config = saved.clone();
    cli.apply(&mut config);
    let mode = config.mode().context("invalid smoothing settings")?;
    tracing::info!(?mode, enabled = config.smoothing_enabled, fps = config.fps, "starting");

    let fps = config.fps;
    let mut state = AppState::new(Page::portfolio(), config, mode).with_saved_config(saved);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_sources(fps);

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| draw(frame, &mut state))?;

        let Some(event) = events.recv().await else {
            break;
        };
        dispatch(&mut state, event);
        // Drain whatever queued up while drawing before the next draw.
        while let Ok(event) = events.try_recv() {
            dispatch(&mut state, event);
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    state.teardown();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if state.open_resume {
        if let Some(path) = state.config.resume_path.as_deref() {
            let opened = shell::open::open_path(path);
            shell::open::print_exit_payload(path, opened);
        }
    }

    Ok(())
}
