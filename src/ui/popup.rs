//! Popup overlays: the settings menu and the "terminal too small" notice.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::settings::SETTINGS_ITEMS;
use crate::app::state::AppState;

const WIDTH: u16 = 44;

/// Smallest page area (columns, rows) the scenes are drawn in.
pub const MIN_PAGE: (u16, u16) = (32, 10);

/// Whether `area` is large enough for the page.
pub fn fits(area: Rect) -> bool {
    area.width >= MIN_PAGE.0 && area.height >= MIN_PAGE.1
}

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
}

impl Widget for SettingsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (SETTINGS_ITEMS.len() as u16) + 7;
        let popup = centered_fixed(WIDTH, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Settings ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let selected = i == self.state.settings_selected;
            let (prefix, style) = if selected {
                (
                    " ▸ ",
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("   ", Style::default().fg(Color::White))
            };

            let value = item.value(self.state);
            let value_style = match value.as_str() {
                "ON" => Style::default().fg(Color::Green),
                "OFF" => Style::default().fg(Color::DarkGray),
                _ => Style::default().fg(Color::Yellow),
            };

            // Label left-aligned, value right-aligned.
            let label_col = format!("{prefix}{:<20}", item.label());
            let value_width = (inner.width as usize)
                .saturating_sub(label_col.chars().count())
                .max(1);
            lines.push(Line::from(vec![
                Span::styled(label_col, style),
                Span::styled(format!("{value:>value_width$}"), value_style),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", self.state.smoother_summary()),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: change  Esc: close",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── too small ─────────

/// Shown in place of the page while the terminal is below [`MIN_PAGE`].
pub struct TooSmallNotice;

impl Widget for TooSmallNotice {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        if area.height == 0 {
            return;
        }
        let lines = vec![
            Line::from(Span::styled(
                "Terminal too small",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("need {}x{}", MIN_PAGE.0, MIN_PAGE.1),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let top = area.y + area.height.saturating_sub(lines.len() as u16) / 2;
        let rect = Rect::new(area.x, top, area.width, (area.y + area.height - top).min(2));
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(rect, buf);
    }
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
