//! Renders the visible slice of the page: a parallax starfield behind every
//! scene intersecting the viewport.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::scenes::{self, SceneContext, Stage};
use super::theme::{wheel_hue, Theme};
use crate::core::{page::Page, trigger::ScrollDirection};

/// One star per this many cells, on average.
const STAR_DENSITY: u64 = 41;
/// The starfield moves at `1 / PARALLAX` of the page speed.
const PARALLAX: usize = 2;

pub struct PageWidget<'a> {
    page: &'a Page,
    offset: usize,
    direction: ScrollDirection,
    frame: u64,
}

impl<'a> PageWidget<'a> {
    pub fn new(page: &'a Page, offset: usize) -> Self {
        Self {
            page,
            offset,
            direction: ScrollDirection::Forward,
            frame: 0,
        }
    }

    pub fn direction(mut self, direction: ScrollDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn frame(mut self, frame: u64) -> Self {
        self.frame = frame;
        self
    }
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, Theme::space_style());
        draw_starfield(area, buf, self.offset, self.frame);

        let rows = area.height as usize;
        let spans = self.page.layout(area.height);
        let extent = spans
            .last()
            .map_or(0, |s| s.end().saturating_sub(rows)) as f64;
        let scene_count = spans.len();

        let visible = spans
            .iter()
            .zip(self.page.scenes())
            .filter(|(span, _)| span.intersects(self.offset, rows));
        for (span, scene) in visible {
            let top = span.start as i64 - self.offset as i64;
            let bottom = top + span.height as i64;
            let clip_top = top.max(0) as u16;
            let clip_bottom = bottom.min(rows as i64) as u16;
            let clip = Rect::new(
                area.x,
                area.y + clip_top,
                area.width,
                clip_bottom.saturating_sub(clip_top),
            );

            let ctx = SceneContext {
                progress: span.trigger(rows).progress_at(self.offset as f64, extent),
                direction: self.direction,
                frame: self.frame,
                hue: wheel_hue(span.index, scene_count),
            };
            scenes::draw(scene.kind, &mut Stage::new(buf, area, clip), ctx);

            // Heading scrolls with the content.
            let heading_row = top + 1;
            if (0..rows as i64 - 1).contains(&heading_row) {
                let y = area.y + heading_row as u16;
                let title = Line::from(Span::styled(
                    format!("  {}", scene.title),
                    Theme::scene_title_style(ctx.hue),
                ));
                let tagline = Line::from(Span::styled(
                    format!("  {}", scene.tagline),
                    Theme::tagline_style(),
                ));
                buf.set_line(area.x, y, &title, area.width);
                buf.set_line(area.x, y + 1, &tagline, area.width);
            }
        }
    }
}

/// Deterministic starfield; rows are taken from "world" space so stars
/// drift slower than the page.
fn draw_starfield(area: Rect, buf: &mut Buffer, offset: usize, frame: u64) {
    let drift = offset / PARALLAX;
    for y in 0..area.height {
        let world_row = (y as usize + drift) as u64;
        for x in 0..area.width {
            let h = star_hash(x as u64, world_row);
            if h % STAR_DENSITY != 0 {
                continue;
            }
            let symbol = match (h >> 8) % 4 {
                0 => "*",
                1 => "+",
                2 => "·",
                _ => ".",
            };
            let phase = ((frame / 6).wrapping_add(h >> 16)) % 16;
            let twinkle = phase as f64 / 15.0;
            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_symbol(symbol).set_style(Theme::star_style(twinkle));
            }
        }
    }
}

/// SplitMix64 over the cell coordinates.
fn star_hash(x: u64, y: u64) -> u64 {
    let mut z = x
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(y.wrapping_mul(0xC2B2_AE3D_27D4_EB4F));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(offset: usize) -> Buffer {
        let page = Page::portfolio();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        PageWidget::new(&page, offset).render(area, &mut buf);
        buf
    }

    fn screen(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn first_screen_shows_welcome_heading() {
        let text = screen(&render(0));
        assert!(text.contains("Welcome aboard"));
        assert!(text.contains("scroll to launch"));
    }

    #[test]
    fn headings_scroll_with_content() {
        // Spiral Intro starts at row 40 with a 20-row viewport.
        let text = screen(&render(30));
        assert!(text.contains("Spiral Intro"));
        let text = screen(&render(45));
        assert!(!text.contains("Spiral Intro"));
    }

    #[test]
    fn same_offset_same_picture() {
        assert_eq!(screen(&render(123)), screen(&render(123)));
    }

    #[test]
    fn starfield_moves_at_half_speed() {
        let area = Rect::new(0, 0, 40, 10);
        let mut a = Buffer::empty(area);
        let mut b = Buffer::empty(area);
        draw_starfield(area, &mut a, 0, 0);
        draw_starfield(area, &mut b, 2, 0);
        // Two page rows move the stars by one.
        for x in 0..area.width {
            assert_eq!(a[(x, 1)].symbol(), b[(x, 0)].symbol());
        }
    }
}
