//! Scroll trigger: maps a scroll offset onto progress between two bounds.
//!
//! Scenes use triggers to "scrub" their animation against scroll position,
//! and the progress-driven position source uses a page-wide trigger
//! (`0 → max`) as its input.

/// One end of a trigger's range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerBound {
    /// A fixed content offset, in rows.
    Offset(f64),
    /// The page's maximum scroll offset, resolved at observation time.
    Max,
}

impl TriggerBound {
    fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Offset(v) => v,
            Self::Max => extent.max(0.0),
        }
    }
}

/// Which way the user last scrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    #[default]
    Forward,
    Backward,
}

impl ScrollDirection {
    /// `+1` forward (down the page), `-1` backward.
    pub fn signum(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Emitted whenever a trigger's progress changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressUpdate {
    /// Position within the trigger's range, in `[0, 1]`.
    pub progress: f64,
    pub direction: ScrollDirection,
}

/// Something that turns raw scroll offsets into progress updates.
pub trait ScrollProgressSource {
    /// Feed the native scroll offset and the current scrollable extent.
    /// Returns an update only when progress moved.
    fn observe(&mut self, offset: f64, extent: f64) -> Option<ProgressUpdate>;

    /// Last observed progress.
    fn progress(&self) -> f64;
}

/// Progress tracker over a `[start, end]` scroll range.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    start: TriggerBound,
    end: TriggerBound,
    progress: f64,
    direction: ScrollDirection,
    last_offset: Option<f64>,
}

impl ScrollTrigger {
    pub fn new(start: TriggerBound, end: TriggerBound) -> Self {
        Self {
            start,
            end,
            progress: 0.0,
            direction: ScrollDirection::Forward,
            last_offset: None,
        }
    }

    /// Whole-page trigger: `0 → max`.
    pub fn page() -> Self {
        Self::new(TriggerBound::Offset(0.0), TriggerBound::Max)
    }

    /// Trigger spanning a fixed row range.
    pub fn between(start: f64, end: f64) -> Self {
        Self::new(TriggerBound::Offset(start), TriggerBound::Offset(end))
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Progress for `offset` without touching trigger state.
    pub fn progress_at(&self, offset: f64, extent: f64) -> f64 {
        let start = self.start.resolve(extent);
        let end = self.end.resolve(extent);
        let span = end - start;
        if span <= 0.0 {
            return if offset > start { 1.0 } else { 0.0 };
        }
        ((offset - start) / span).clamp(0.0, 1.0)
    }
}

impl ScrollProgressSource for ScrollTrigger {
    fn observe(&mut self, offset: f64, extent: f64) -> Option<ProgressUpdate> {
        let first = self.last_offset.is_none();
        if let Some(last) = self.last_offset {
            if offset > last {
                self.direction = ScrollDirection::Forward;
            } else if offset < last {
                self.direction = ScrollDirection::Backward;
            }
        }
        self.last_offset = Some(offset);

        let progress = self.progress_at(offset, extent);
        if !first && progress == self.progress {
            return None;
        }
        self.progress = progress;
        Some(ProgressUpdate {
            progress,
            direction: self.direction,
        })
    }

    fn progress(&self) -> f64 {
        self.progress
    }
}
