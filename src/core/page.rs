//! The page model: an ordered stack of full-viewport scenes.
//!
//! Scene heights are expressed in viewport multiples (like CSS `vh`), so the
//! content height depends on the terminal size and is recomputed on resize.

use super::trigger::ScrollTrigger;

/// Which scene renderer draws a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    /// Scroll cue that shrinks away as the page starts moving.
    Welcome,
    /// Spiral that draws itself outward.
    SpiralIntro,
    /// Ring of circles rotating around a core.
    PranaSphere,
    /// Skill asteroids drifting apart.
    StellarSkills,
    /// Spaceship crossing the screen, facing the scroll direction.
    StarCruise,
    /// Footballer line drawing revealed stroke by stroke.
    Gravikick,
}

/// One section of the page.
#[derive(Debug, Clone)]
pub struct Scene {
    pub kind: SceneKind,
    pub title: &'static str,
    pub tagline: &'static str,
    /// Height in viewports.
    pub screens: f32,
}

/// A scene's placement for a given viewport height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneSpan {
    pub index: usize,
    /// First content row.
    pub start: usize,
    /// Rows covered.
    pub height: usize,
}

impl SceneSpan {
    pub fn end(&self) -> usize {
        self.start + self.height
    }

    /// Whether any row of the span lies inside `[offset, offset + rows)`.
    pub fn intersects(&self, offset: usize, rows: usize) -> bool {
        self.start < offset + rows && offset < self.end()
    }

    /// Trigger running from "scene top hits viewport top" to "scene bottom
    /// hits viewport bottom".
    pub fn trigger(&self, viewport_rows: usize) -> ScrollTrigger {
        let end = self.end().saturating_sub(viewport_rows).max(self.start);
        ScrollTrigger::between(self.start as f64, end as f64)
    }
}

/// Ordered scenes.
#[derive(Debug, Clone)]
pub struct Page {
    scenes: Vec<Scene>,
}

impl Page {
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self { scenes }
    }

    /// The space portfolio.
    pub fn portfolio() -> Self {
        Self::new(vec![
            Scene {
                kind: SceneKind::Welcome,
                title: "Welcome aboard",
                tagline: "scroll to launch",
                screens: 2.0,
            },
            Scene {
                kind: SceneKind::SpiralIntro,
                title: "Spiral Intro",
                tagline: "every orbit starts at the centre",
                screens: 3.0,
            },
            Scene {
                kind: SceneKind::PranaSphere,
                title: "Prana Sphere",
                tagline: "breathing in circles",
                screens: 3.0,
            },
            Scene {
                kind: SceneKind::StellarSkills,
                title: "Stellar Skills",
                tagline: "the asteroid belt of things I build with",
                screens: 4.0,
            },
            Scene {
                kind: SceneKind::StarCruise,
                title: "Star Cruise",
                tagline: "hold on, we are changing galaxies",
                screens: 4.0,
            },
            Scene {
                kind: SceneKind::Gravikick,
                title: "Gravikick",
                tagline: "off the pitch, into orbit",
                screens: 3.0,
            },
        ])
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    /// Lay the scenes out top to bottom for a viewport of `viewport_rows`.
    pub fn layout(&self, viewport_rows: u16) -> Vec<SceneSpan> {
        let mut start = 0;
        self.scenes
            .iter()
            .enumerate()
            .map(|(index, scene)| {
                let height = (scene.screens * viewport_rows as f32).round().max(1.0) as usize;
                let span = SceneSpan { index, start, height };
                start += height;
                span
            })
            .collect()
    }

    /// Total content height in rows.
    pub fn content_height(&self, viewport_rows: u16) -> usize {
        self.layout(viewport_rows).last().map_or(0, SceneSpan::end)
    }

    /// Span of the scene containing `row`, if any.
    pub fn scene_at(&self, row: usize, viewport_rows: u16) -> Option<SceneSpan> {
        self.layout(viewport_rows)
            .into_iter()
            .find(|span| span.start <= row && row < span.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_are_contiguous() {
        let page = Page::portfolio();
        let spans = page.layout(20);
        assert_eq!(spans.len(), page.scenes().len());
        assert_eq!(spans[0].start, 0);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start);
        }
        assert_eq!(page.content_height(20), 19 * 20);
    }

    #[test]
    fn content_scales_with_viewport() {
        let page = Page::portfolio();
        assert_eq!(page.content_height(10) * 2, page.content_height(20));
        assert_eq!(page.content_height(0), page.scenes().len());
    }

    #[test]
    fn scene_lookup_by_row() {
        let page = Page::portfolio();
        assert_eq!(page.scene_at(0, 20).map(|s| s.index), Some(0));
        assert_eq!(page.scene_at(40, 20).map(|s| s.index), Some(1));
        assert_eq!(page.scene_at(10_000, 20), None);
    }

    #[test]
    fn scene_trigger_spans_top_to_bottom() {
        let span = SceneSpan { index: 0, start: 100, height: 60 };
        let t = span.trigger(20);
        assert_eq!(t.progress_at(100.0, 1000.0), 0.0);
        assert_eq!(t.progress_at(120.0, 1000.0), 0.5);
        assert_eq!(t.progress_at(140.0, 1000.0), 1.0);
    }

    #[test]
    fn intersection_with_viewport() {
        let span = SceneSpan { index: 0, start: 40, height: 20 };
        assert!(span.intersects(30, 20));
        assert!(!span.intersects(60, 20));
        assert!(!span.intersects(10, 30));
    }
}
