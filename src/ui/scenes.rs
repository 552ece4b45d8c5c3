//! Scene artwork.  Each scene is drawn from its scroll progress alone, so a
//! given offset always produces the same picture.
//!
//! Artwork is pinned to the viewport centre and clipped to the rows the
//! scene currently occupies on screen.

use std::f64::consts::TAU;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
};

use super::theme::{wheel_hue, Theme};
use crate::core::{ease::Ease, page::SceneKind, trigger::ScrollDirection};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

const SKILLS: &[&str] = &[
    "Rust", "TypeScript", "React", "Three.js", "GSAP", "WebGL", "Node", "Python", "Blender",
    "Postgres",
];

/// Drawing surface for one scene: the full viewport for geometry, the
/// visible slice of the scene for clipping.
pub struct Stage<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    clip: Rect,
}

impl<'a> Stage<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, clip: Rect) -> Self {
        Self { buf, area, clip }
    }

    fn center(&self) -> (f64, f64) {
        (
            self.area.x as f64 + self.area.width as f64 / 2.0,
            self.area.y as f64 + self.area.height as f64 / 2.0,
        )
    }

    fn plot(&mut self, x: f64, y: f64, symbol: &str, style: Style) {
        let (x, y) = (x.round(), y.round());
        if x < 0.0 || y < 0.0 || x > u16::MAX as f64 || y > u16::MAX as f64 {
            return;
        }
        let pos = Position::new(x as u16, y as u16);
        if !self.clip.contains(pos) {
            return;
        }
        if let Some(cell) = self.buf.cell_mut(pos) {
            cell.set_symbol(symbol).set_style(style);
        }
    }

    /// Text centred horizontally on `cx`.
    fn text_centered(&mut self, cx: f64, y: f64, text: &str, style: Style) {
        let len = text.chars().count() as f64;
        let start = (cx - len / 2.0).round();
        let mut tmp = [0u8; 4];
        for (i, ch) in text.chars().enumerate() {
            self.plot(start + i as f64, y, ch.encode_utf8(&mut tmp), style);
        }
    }

    /// Straight segment from `a` to `b`, drawn up to fraction `t` of its
    /// length.
    fn segment(&mut self, a: (f64, f64), b: (f64, f64), t: f64, symbol: &str, style: Style) {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return;
        }
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let steps = (dx.abs().max(dy.abs()) * t * 2.0).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let f = t * i as f64 / steps as f64;
            self.plot(a.0 + dx * f, a.1 + dy * f, symbol, style);
        }
    }
}

/// Per-frame inputs shared by every scene.
#[derive(Debug, Clone, Copy)]
pub struct SceneContext {
    /// Scene-local progress in `[0, 1]`.
    pub progress: f64,
    pub direction: ScrollDirection,
    pub frame: u64,
    pub hue: f64,
}

pub fn draw(kind: SceneKind, stage: &mut Stage, ctx: SceneContext) {
    match kind {
        SceneKind::Welcome => welcome(stage, ctx),
        SceneKind::SpiralIntro => spiral(stage, ctx),
        SceneKind::PranaSphere => prana_sphere(stage, ctx),
        SceneKind::StellarSkills => stellar_skills(stage, ctx),
        SceneKind::StarCruise => star_cruise(stage, ctx),
        SceneKind::Gravikick => gravikick(stage, ctx),
    }
}

fn welcome(stage: &mut Stage, ctx: SceneContext) {
    let (cx, cy) = stage.center();
    let style = if ctx.progress < 0.5 {
        Theme::ink(ctx.hue, 0.75)
    } else {
        Theme::dim_ink()
    };
    stage.text_centered(cx, cy - 1.0, "C O S M I C   S C R O L L", style);
    stage.text_centered(cx, cy + 1.0, "a portfolio among the stars", Theme::tagline_style());
}

/// Archimedean spiral growing outward with progress.
fn spiral(stage: &mut Stage, ctx: SceneContext) {
    const TURNS: f64 = 5.0;
    const STEP: f64 = 0.12;

    let (cx, cy) = stage.center();
    let max_r = (stage.area.height as f64 / 2.0 - 1.0).max(1.0);
    let growth = max_r / (TURNS * TAU);
    let sweep = Ease::Power1Out.apply(ctx.progress) * TURNS * TAU;

    let mut theta = 0.0;
    while theta <= sweep {
        let r = growth * theta;
        let style = Theme::ink(ctx.hue + theta.to_degrees() / 8.0, 0.65);
        stage.plot(
            cx + r * theta.cos() * CELL_ASPECT,
            cy + r * theta.sin(),
            "•",
            style,
        );
        theta += STEP;
    }
}

/// Ring of circles orbiting a core; scroll turns the ring.
fn prana_sphere(stage: &mut Stage, ctx: SceneContext) {
    const COUNT: usize = 14;

    let (cx, cy) = stage.center();
    let ry = (stage.area.height as f64 * 0.3).max(1.0);
    let rx = (ry * CELL_ASPECT * 1.4).min(stage.area.width as f64 * 0.4);
    let turn = ctx.progress * TAU * 1.5;

    // Back half first so the front half overdraws it.
    let mut orbs: Vec<(f64, usize)> = (0..COUNT)
        .map(|i| (TAU * i as f64 / COUNT as f64 + turn, i))
        .collect();
    orbs.sort_by(|a, b| a.0.sin().total_cmp(&b.0.sin()));

    for (angle, i) in orbs {
        let depth = angle.sin();
        let symbol = if depth > 0.3 {
            "O"
        } else if depth > -0.3 {
            "o"
        } else {
            "·"
        };
        let style = Theme::ink(wheel_hue(i, COUNT), 0.45 + 0.25 * depth);
        stage.plot(cx + rx * angle.cos(), cy + ry * 0.35 * depth, symbol, style);
    }

    let breath = if (ctx.frame / 20) % 2 == 0 { "(✺)" } else { "( ✺ )" };
    stage.text_centered(cx, cy, breath, Theme::ink(ctx.hue, 0.7));
}

/// Skill names drifting apart like an exploding asteroid belt.
fn stellar_skills(stage: &mut Stage, ctx: SceneContext) {
    let (cx, cy) = stage.center();
    let max_r = (stage.area.height as f64 / 2.0 - 1.0).max(1.0);
    let r = 1.0 + Ease::Power2Out.apply(ctx.progress) * max_r;

    for (i, skill) in SKILLS.iter().enumerate() {
        let angle = TAU * i as f64 / SKILLS.len() as f64 + 0.3;
        let label = format!("◆ {skill}");
        stage.text_centered(
            cx + r * angle.cos() * CELL_ASPECT,
            cy + r * angle.sin(),
            &label,
            Theme::ink(wheel_hue(i, SKILLS.len()), 0.65),
        );
    }
}

/// Ship crossing the screen, nose pointing the way the page scrolls.
fn star_cruise(stage: &mut Stage, ctx: SceneContext) {
    const TRAIL: usize = 8;

    let (_, cy) = stage.center();
    let left = stage.area.x as f64 + 2.0;
    let right = (stage.area.x + stage.area.width) as f64 - 6.0;
    let x = left + (right - left).max(0.0) * ctx.progress;

    let ship = match ctx.direction {
        ScrollDirection::Forward => "=≡>",
        ScrollDirection::Backward => "<≡=",
    };
    // Exhaust streams out behind the nose.
    let trail_dir = -f64::from(ctx.direction.signum());
    let ship_x = if trail_dir < 0.0 { x } else { x - 2.0 };
    for (i, ch) in ship.chars().enumerate() {
        let mut tmp = [0u8; 4];
        stage.plot(ship_x + i as f64, cy, ch.encode_utf8(&mut tmp), Theme::ink(ctx.hue, 0.75));
    }

    let exhaust_x = if trail_dir < 0.0 { ship_x - 1.0 } else { ship_x + 3.0 };
    for i in 0..TRAIL {
        let flicker = (ctx.frame as usize + i) % 3 == 0;
        let symbol = if flicker { "~" } else { "-" };
        let fade = 0.7 - 0.06 * i as f64;
        stage.plot(
            exhaust_x + trail_dir * i as f64,
            cy,
            symbol,
            Theme::ink(30.0 + 6.0 * i as f64, fade),
        );
    }
}

/// A footballer drawn stroke by stroke, then the ball leaves.
fn gravikick(stage: &mut Stage, ctx: SceneContext) {
    // Unit-box strokes: head, torso, arms, standing leg, kicking leg.
    const STROKES: &[((f64, f64), (f64, f64))] = &[
        ((0.45, 0.05), (0.55, 0.05)),
        ((0.55, 0.05), (0.55, 0.2)),
        ((0.55, 0.2), (0.45, 0.2)),
        ((0.45, 0.2), (0.45, 0.05)),
        ((0.5, 0.2), (0.48, 0.55)),
        ((0.49, 0.3), (0.3, 0.42)),
        ((0.49, 0.3), (0.68, 0.25)),
        ((0.48, 0.55), (0.4, 0.95)),
        ((0.48, 0.55), (0.62, 0.7)),
        ((0.62, 0.7), (0.78, 0.82)),
    ];
    const KICK_AT: f64 = 0.85;

    let (cx, cy) = stage.center();
    let h = (stage.area.height as f64 - 4.0).max(4.0);
    let w = h * CELL_ASPECT;
    let origin = (cx - w / 2.0, cy - h / 2.0);
    let map = |(x, y): (f64, f64)| (origin.0 + x * w, origin.1 + y * h);

    let reveal = (ctx.progress / KICK_AT).min(1.0) * STROKES.len() as f64;
    let style = Theme::ink(ctx.hue, 0.7);
    for (i, &(a, b)) in STROKES.iter().enumerate() {
        stage.segment(map(a), map(b), reveal - i as f64, "*", style);
    }

    let flight = ((ctx.progress - KICK_AT) / (1.0 - KICK_AT)).clamp(0.0, 1.0);
    if reveal >= STROKES.len() as f64 {
        let (bx, by) = map((0.84 + flight * 0.5, 0.85 - flight * 0.8));
        stage.plot(bx, by, "●", Theme::ink(ctx.hue + 180.0, 0.6));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(kind: SceneKind, progress: f64, direction: ScrollDirection) -> Buffer {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        let mut stage = Stage::new(&mut buf, area, area);
        draw(
            kind,
            &mut stage,
            SceneContext { progress, direction, frame: 0, hue: 200.0 },
        );
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn count(buf: &Buffer, symbol: &str) -> usize {
        buf.content().iter().filter(|c| c.symbol() == symbol).count()
    }

    #[test]
    fn spiral_grows_with_progress() {
        let early = count(&render(SceneKind::SpiralIntro, 0.1, ScrollDirection::Forward), "•");
        let late = count(&render(SceneKind::SpiralIntro, 0.9, ScrollDirection::Forward), "•");
        assert!(early > 0);
        assert!(late > early);
    }

    #[test]
    fn ship_faces_scroll_direction() {
        let fwd = render(SceneKind::StarCruise, 0.5, ScrollDirection::Forward);
        let back = render(SceneKind::StarCruise, 0.5, ScrollDirection::Backward);
        assert!(row(&fwd, 10).contains("=≡>"));
        assert!(row(&back, 10).contains("<≡="));
    }

    #[test]
    fn kick_happens_at_the_end() {
        let before = render(SceneKind::Gravikick, 0.5, ScrollDirection::Forward);
        let after = render(SceneKind::Gravikick, 1.0, ScrollDirection::Forward);
        assert_eq!(count(&before, "●"), 0);
        assert_eq!(count(&after, "●"), 1);
        assert!(count(&after, "*") > count(&before, "*"));
    }

    #[test]
    fn drawing_respects_clip() {
        let area = Rect::new(0, 0, 60, 20);
        let clip = Rect::new(0, 15, 60, 5);
        let mut buf = Buffer::empty(area);
        let mut stage = Stage::new(&mut buf, area, clip);
        draw(
            SceneKind::Welcome,
            &mut stage,
            SceneContext {
                progress: 0.0,
                direction: ScrollDirection::Forward,
                frame: 0,
                hue: 0.0,
            },
        );
        // The title sits at the centre row, outside the clip.
        assert!(buf.content().iter().all(|c| c.symbol() == " "));
    }
}
