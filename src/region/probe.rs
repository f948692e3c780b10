use std::collections::BTreeMap;

use crate::foundation::core::Rect;

/// Reads live layout from the host. Rects are viewport-relative at the current offset.
pub trait LayoutProbe {
    /// Rect of the region's in-flow anchor, or `None` when it is not mounted.
    fn anchor_rect(&self, region: &str) -> Option<Rect>;

    /// Height of the pinned container. `None` means "same as the anchor".
    fn container_height(&self, _region: &str) -> Option<f64> {
        None
    }
}

/// Document position of a region in a static page layout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StaticLayout {
    /// Document-space top of the anchor.
    pub top: f64,
    pub height: f64,
    #[serde(default)]
    pub container_height: Option<f64>,
}

impl StaticLayout {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height,
            container_height: None,
        }
    }
}

/// Layout probe backed by fixed document positions. Drives offline simulation and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticProbe {
    layouts: BTreeMap<String, StaticLayout>,
    offset: f64,
    width: f64,
}

impl StaticProbe {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn insert(&mut self, region: impl Into<String>, layout: StaticLayout) {
        self.layouts.insert(region.into(), layout);
    }

    pub fn remove(&mut self, region: &str) -> Option<StaticLayout> {
        self.layouts.remove(region)
    }

    pub fn layout(&self, region: &str) -> Option<&StaticLayout> {
        self.layouts.get(region)
    }

    /// Scroll offset the returned rects are relative to.
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }
}

impl LayoutProbe for StaticProbe {
    fn anchor_rect(&self, region: &str) -> Option<Rect> {
        let l = self.layouts.get(region)?;
        Some(Rect::new(
            0.0,
            l.top - self.offset,
            self.width,
            l.top + l.height - self.offset,
        ))
    }

    fn container_height(&self, region: &str) -> Option<f64> {
        let l = self.layouts.get(region)?;
        Some(l.container_height.unwrap_or(l.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/region/probe.rs"]
mod tests;
