//! Scroll surface: the thing being scrolled.
//!
//! The smoother only ever talks to a surface through [`ScrollSurface`], so it
//! can be driven against the terminal [`Viewport`] or a test double.

/// Read and jump the visible scroll offset of a scrollable area.
pub trait ScrollSurface {
    /// Current scroll offset (rows from the top of the content).
    fn offset(&self) -> f64;

    /// Jump to `offset` immediately.  No animation: smoothing happens by
    /// issuing many small jumps across frames.
    fn set_offset(&mut self, offset: f64);

    /// Total scrollable distance: content height minus viewport height.
    /// May be zero or negative when the content fits.
    fn scrollable_extent(&self) -> f64;
}

/// The terminal viewport onto the page.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    /// First visible content row.
    offset: usize,
    /// Visible rows.  Zero until the first layout pass.
    height: u16,
    /// Full content height in rows.
    content_height: usize,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update geometry after a layout pass.  The offset is re-clamped since
    /// the scrollable extent may have shrunk.
    pub fn resize(&mut self, height: u16, content_height: usize) {
        self.height = height;
        self.content_height = content_height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// `None` until the viewport has been laid out (nothing to scroll yet).
    pub fn as_mounted(&self) -> Option<&Self> {
        (self.height > 0).then_some(self)
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// First visible row, as an integer.
    pub fn row_offset(&self) -> usize {
        self.offset
    }

    /// Largest valid offset.
    pub fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.height as usize)
    }

    /// Fraction of the scrollable extent already scrolled, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let max = self.max_offset();
        if max == 0 {
            0.0
        } else {
            self.offset as f64 / max as f64
        }
    }
}

impl ScrollSurface for Viewport {
    fn offset(&self) -> f64 {
        self.offset as f64
    }

    fn set_offset(&mut self, offset: f64) {
        let clamped = offset.round().max(0.0) as usize;
        self.offset = clamped.min(self.max_offset());
    }

    fn scrollable_extent(&self) -> f64 {
        self.content_height as f64 - self.height as f64
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::ScrollSurface;

    /// Spy surface: remembers every jump it was asked to make.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub offset: f64,
        pub extent: f64,
        pub writes: Vec<f64>,
    }

    impl RecordingSurface {
        pub fn new(offset: f64, extent: f64) -> Self {
            Self {
                offset,
                extent,
                writes: Vec::new(),
            }
        }
    }

    impl ScrollSurface for RecordingSurface {
        fn offset(&self) -> f64 {
            self.offset
        }

        fn set_offset(&mut self, offset: f64) {
            self.offset = offset;
            self.writes.push(offset);
        }

        fn scrollable_extent(&self) -> f64 {
            self.extent
        }
    }
}
