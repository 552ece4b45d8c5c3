//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme. Change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── page ───────────────────────────────────────────────────
    pub fn space_style() -> Style {
        Style::default().bg(Color::Black)
    }

    /// Star glyph style; `twinkle` in `[0, 1]` picks the brightness.
    pub fn star_style(twinkle: f64) -> Style {
        let l = 0.35 + 0.6 * twinkle.clamp(0.0, 1.0);
        Style::default().fg(hsl(220.0, 0.3, l))
    }

    pub fn scene_title_style(hue: f64) -> Style {
        Style::default()
            .fg(hsl(hue, 0.9, 0.7))
            .add_modifier(Modifier::BOLD)
    }

    pub fn tagline_style() -> Style {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC)
    }

    /// Foreground in a given hue (scene artwork).
    pub fn ink(hue: f64, lightness: f64) -> Style {
        Style::default().fg(hsl(hue, 0.9, lightness))
    }

    pub fn dim_ink() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn indicator_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn status_accent_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}

/// Hue for item `i` of `n` evenly spaced around the colour wheel.
pub fn wheel_hue(i: usize, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    360.0 * i as f64 / n as f64
}

/// HSL (hue in degrees, saturation and lightness in `[0, 1]`) to RGB.
pub fn hsl(h: f64, s: f64, l: f64) -> Color {
    let (r, g, b) = hsl_to_rgb(h, s, l);
    Color::Rgb(r, g, b)
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0) / 60.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), (0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), (0, 0, 255));
        assert_eq!(hsl_to_rgb(360.0, 1.0, 0.5), (255, 0, 0));
    }

    #[test]
    fn greys_ignore_hue() {
        assert_eq!(hsl_to_rgb(77.0, 0.0, 0.5), (128, 128, 128));
        assert_eq!(hsl_to_rgb(200.0, 1.0, 1.0), (255, 255, 255));
    }

    #[test]
    fn wheel_spacing() {
        assert_eq!(wheel_hue(0, 4), 0.0);
        assert_eq!(wheel_hue(1, 4), 90.0);
        assert_eq!(wheel_hue(3, 0), 0.0);
    }
}
