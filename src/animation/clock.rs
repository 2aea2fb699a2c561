use std::ops::Range;

use crate::foundation::error::{ExportError, ExportResult};
use crate::foundation::math::decimal_width;

/// Frame timing for one animated object with `count` frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameClock {
    count: u32,
    width: usize,
}

impl FrameClock {
    /// Create a clock for `count >= 1` frames.
    pub fn new(count: u32) -> ExportResult<Self> {
        if count == 0 {
            return Err(ExportError::annotation("frame count must be at least 1"));
        }
        Ok(Self {
            count,
            width: decimal_width(count - 1),
        })
    }

    /// Number of frames.
    pub fn count(self) -> u32 {
        self.count
    }

    /// Frame indices in render order.
    pub fn frames(self) -> Range<u32> {
        0..self.count
    }

    /// Normalized position of `frame` in `[0, 1]`; a single frame sits at `0`.
    pub fn position(self, frame: u32) -> f64 {
        if self.count <= 1 {
            0.0
        } else {
            f64::from(frame) / f64::from(self.count - 1)
        }
    }

    /// `frame` zero-padded to the width of the last frame index.
    pub fn label(self, frame: u32) -> String {
        format!("{frame:0width$}", width = self.width)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
