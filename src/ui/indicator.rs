//! Scroll cue: a small mouse outline with a pulsing wheel dot, rendered at
//! the bottom centre of the page.  It shrinks away over the first two
//! screens of scrolling.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

/// Wheel-dot positions inside the outline, cycled on frame ticks.
const PULSE_FRAMES: &[&str] = &["│•│", "│•│", "│·│", "│ │"];
/// Frames per pulse step at 60 fps.
const PULSE_HOLD: u64 = 10;

/// The scroll cue.
pub struct ScrollIndicator {
    /// Visible page offset in rows.
    pub offset: usize,
    /// Viewport height in rows.
    pub viewport_rows: u16,
    /// Monotonically increasing frame counter (drives the pulse).
    pub tick: u64,
}

impl ScrollIndicator {
    /// `1.0` at the top of the page, `0.0` two screens down.
    pub fn scale(&self) -> f64 {
        let span = 2.0 * self.viewport_rows as f64;
        if span <= 0.0 {
            return 0.0;
        }
        (1.0 - self.offset as f64 / span).clamp(0.0, 1.0)
    }
}

impl Widget for ScrollIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let scale = self.scale();
        if scale <= 0.0 || area.width < 8 || area.height < 4 {
            return;
        }

        let pulse = PULSE_FRAMES[((self.tick / PULSE_HOLD) as usize) % PULSE_FRAMES.len()];
        let rows: Vec<&str> = if scale > 0.6 {
            vec!["╭─╮", pulse, "╰─╯", "scroll"]
        } else if scale > 0.25 {
            vec![pulse, "⌄"]
        } else {
            vec!["⌄"]
        };

        let style = Theme::indicator_style();
        let bottom = area.y + area.height - 1;
        let top = bottom.saturating_sub(rows.len() as u16 - 1).max(area.y);
        for (i, text) in rows.iter().enumerate() {
            let width = text.chars().count() as u16;
            let x = area.x + area.width.saturating_sub(width) / 2;
            let line = Line::from(Span::styled(*text, style));
            buf.set_line(x, top + i as u16, &line, width);
        }
    }
}
