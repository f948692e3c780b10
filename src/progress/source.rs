use crate::{
    foundation::core::{Rect, Size, rect_is_finite, size_is_usable},
    foundation::error::{ScrollError, ScrollResult},
    foundation::math::clamp01,
};

/// A scroll distance, either absolute or relative to the viewport height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Distance {
    Px(f64),
    /// Multiples of the viewport height (`1.0` == one screen).
    Viewport(f64),
}

impl Distance {
    pub fn resolve(self, viewport: Size) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Viewport(f) => f * viewport.height,
        }
    }

    pub fn validate(self, what: &str) -> ScrollResult<()> {
        let v = match self {
            Self::Px(v) | Self::Viewport(v) => v,
        };
        if !v.is_finite() || v < 0.0 {
            return Err(ScrollError::config(format!(
                "{what} must be finite and >= 0, got {v}"
            )));
        }
        Ok(())
    }
}

/// Where a region starts: the point `element` (fraction of the anchor's height,
/// 0 = top) meets the point `viewport` (fraction of viewport height, 0 = top).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerPoint {
    #[serde(default)]
    pub element: f64,
    #[serde(default)]
    pub viewport: f64,
}

impl TriggerPoint {
    pub const TOP_TOP: TriggerPoint = TriggerPoint {
        element: 0.0,
        viewport: 0.0,
    };

    pub const TOP_CENTER: TriggerPoint = TriggerPoint {
        element: 0.0,
        viewport: 0.5,
    };
}

/// Measured layout of one region, in document scroll coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Geometry {
    /// Scroll offset at which progress is 0.
    pub start: f64,
    /// Scroll distance over which progress runs 0 -> 1. Zero means degenerate.
    pub extent: f64,
    /// Viewport-relative top of the anchor while the region is pinned.
    pub pin_top: f64,
    pub viewport: Size,
    /// Anchor rect translated into document space.
    pub anchor: Rect,
}

impl Geometry {
    pub fn end(&self) -> f64 {
        self.start + self.extent
    }

    pub fn is_degenerate(&self) -> bool {
        self.extent.is_nan() || self.extent <= 0.0
    }

    /// Unclamped progress; may leave `[0, 1]` during overscroll.
    pub fn raw_progress(&self, offset: f64) -> f64 {
        (offset - self.start) / self.extent
    }
}

/// Progress reading for one region.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum Progress {
    /// Anchor not measured yet; nothing should be drawn from this region's state.
    Unmeasured,
    /// No scroll distance to animate over: render the final state, skip animation.
    Degenerate,
    /// Clamped to `[0, 1]`.
    Value(f64),
}

impl Progress {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Converts scroll offsets into normalized progress for one bounded region.
#[derive(Clone, Debug)]
pub struct ProgressSource {
    scene_count: usize,
    per_scene: Distance,
    min_extent: Distance,
    trigger: TriggerPoint,
    reduced_motion: bool,
    narrow_below: Option<f64>,
    geometry: Option<Geometry>,
}

impl ProgressSource {
    pub fn new(scene_count: usize, per_scene: Distance) -> Self {
        Self {
            scene_count,
            per_scene,
            min_extent: Distance::Px(0.0),
            trigger: TriggerPoint::TOP_TOP,
            reduced_motion: false,
            narrow_below: None,
            geometry: None,
        }
    }

    pub fn with_min_extent(mut self, min_extent: Distance) -> Self {
        self.min_extent = min_extent;
        self
    }

    pub fn with_trigger(mut self, trigger: TriggerPoint) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn with_narrow_below(mut self, width: Option<f64>) -> Self {
        self.narrow_below = width;
        self
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Toggle reduced motion at runtime; the extent is re-derived from the last measurement.
    pub fn set_reduced_motion(&mut self, on: bool) {
        self.reduced_motion = on;
        if let Some(g) = self.geometry.as_mut() {
            g.extent = extent_for(
                self.scene_count,
                self.per_scene,
                self.min_extent,
                self.reduced_motion,
                self.narrow_below,
                g.viewport,
            );
        }
    }

    /// Record a fresh measurement. `anchor` is viewport-relative, taken while the
    /// page is scrolled to `scroll_offset`; it should be the in-flow placeholder,
    /// not the pinned container itself.
    pub fn measure(
        &mut self,
        anchor: Rect,
        viewport: Size,
        scroll_offset: f64,
    ) -> ScrollResult<Geometry> {
        if !rect_is_finite(anchor) {
            return Err(ScrollError::measurement("anchor rect is not finite"));
        }
        if !size_is_usable(viewport) {
            return Err(ScrollError::measurement(format!(
                "viewport {}x{} is not usable",
                viewport.width, viewport.height
            )));
        }
        if !scroll_offset.is_finite() {
            return Err(ScrollError::measurement("scroll offset is not finite"));
        }

        let doc_anchor = Rect::new(
            anchor.x0,
            anchor.y0 + scroll_offset,
            anchor.x1,
            anchor.y1 + scroll_offset,
        );
        let start = doc_anchor.y0 + self.trigger.element * doc_anchor.height()
            - self.trigger.viewport * viewport.height;

        let geometry = Geometry {
            start,
            extent: extent_for(
                self.scene_count,
                self.per_scene,
                self.min_extent,
                self.reduced_motion,
                self.narrow_below,
                viewport,
            ),
            pin_top: doc_anchor.y0 - start,
            viewport,
            anchor: doc_anchor,
        };
        self.geometry = Some(geometry);
        Ok(geometry)
    }

    pub fn progress(&self, offset: f64) -> Progress {
        let Some(g) = self.geometry.as_ref() else {
            return Progress::Unmeasured;
        };
        if g.is_degenerate() {
            return Progress::Degenerate;
        }
        Progress::Value(clamp01(g.raw_progress(offset)))
    }

    pub fn raw_progress(&self, offset: f64) -> Option<f64> {
        self.geometry
            .as_ref()
            .filter(|g| !g.is_degenerate())
            .map(|g| g.raw_progress(offset))
    }
}

fn extent_for(
    scene_count: usize,
    per_scene: Distance,
    min_extent: Distance,
    reduced_motion: bool,
    narrow_below: Option<f64>,
    viewport: Size,
) -> f64 {
    if reduced_motion || narrow_below.is_some_and(|w| viewport.width < w) {
        return 0.0;
    }
    let raw = scene_count as f64 * per_scene.resolve(viewport);
    let extent = raw.max(min_extent.resolve(viewport));
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/progress/source.rs"]
mod tests;
