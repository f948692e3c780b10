use crate::foundation::error::{ScrollError, ScrollResult};
use crate::foundation::math::is_unit;

pub use kurbo::{Rect, Size};

/// Half-open progress range `[start, end)` within `[0, 1]`.
///
/// Used both for scene windows (fractions of a region's progress) and for layer
/// sub-windows (fractions of a scene's local progress).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Window {
    pub start: f64,
    pub end: f64,
}

impl Window {
    /// The whole unit range.
    pub const FULL: Window = Window {
        start: 0.0,
        end: 1.0,
    };

    pub fn new(start: f64, end: f64) -> ScrollResult<Self> {
        let w = Self { start, end };
        w.validate()?;
        Ok(w)
    }

    pub fn validate(self) -> ScrollResult<()> {
        if !is_unit(self.start) || !is_unit(self.end) {
            return Err(ScrollError::config(format!(
                "window bounds must lie in [0, 1], got [{}, {})",
                self.start, self.end
            )));
        }
        if self.start > self.end {
            return Err(ScrollError::config(format!(
                "window start must be <= end, got [{}, {})",
                self.start, self.end
            )));
        }
        Ok(())
    }

    pub fn len(self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0.0
    }

    /// `start <= p < end`, except that a window ending at 1 also owns 1.
    pub fn contains(self, p: f64) -> bool {
        if self.end >= 1.0 && p == 1.0 {
            return self.start <= 1.0;
        }
        self.start <= p && p < self.end
    }

    pub fn overlaps(self, other: Window) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Unit of a layer's positional offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LengthUnit {
    /// CSS pixels.
    #[default]
    Px,
    /// Percent of the viewport: `x` in viewport width, `y` in viewport height.
    Viewport,
}

pub(crate) fn rect_is_finite(r: Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}

pub(crate) fn size_is_usable(s: Size) -> bool {
    s.width.is_finite() && s.height.is_finite() && s.width > 0.0 && s.height > 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
