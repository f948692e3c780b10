use std::{fs, path::Path};

use anyhow::Context as _;

use crate::{
    animation::interp::StateBounds,
    foundation::core::Size,
    foundation::error::{ScrollError, ScrollResult},
    foundation::math::is_unit,
    pin::controller::PinSupport,
    progress::source::{Distance, TriggerPoint},
    region::probe::{StaticLayout, StaticProbe},
    timeline::scene::{SceneSpec, SceneTable},
};

fn default_per_scene_distance() -> Distance {
    Distance::Viewport(1.0)
}

fn default_min_extent() -> Distance {
    Distance::Px(0.0)
}

fn default_true() -> bool {
    true
}

fn default_viewport() -> Size {
    Size::new(1280.0, 800.0)
}

/// Tuning surface of one scroll region. Every constant that used to be tuned per page
/// lives here.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegionConfig {
    pub scene_count: usize,
    #[serde(default)]
    pub overlap_fraction: f64,
    #[serde(default = "default_per_scene_distance")]
    pub per_scene_distance: Distance,
    #[serde(default = "default_min_extent")]
    pub min_extent: Distance,
    /// Render final state only: no pin, no animation.
    #[serde(default)]
    pub reduced_motion: bool,
    #[serde(default)]
    pub trigger: TriggerPoint,
    #[serde(default)]
    pub min_scale: f64,
    #[serde(default)]
    pub pin: PinSupport,
    /// Viewport width below which the region is treated as degenerate.
    #[serde(default)]
    pub narrow_below: Option<f64>,
    #[serde(default = "default_true")]
    pub preserve_progress_on_resize: bool,
    #[serde(default)]
    pub scene_weights: Option<Vec<f64>>,
}

impl RegionConfig {
    pub fn new(scene_count: usize) -> Self {
        Self {
            scene_count,
            overlap_fraction: 0.0,
            per_scene_distance: default_per_scene_distance(),
            min_extent: default_min_extent(),
            reduced_motion: false,
            trigger: TriggerPoint::default(),
            min_scale: 0.0,
            pin: PinSupport::Fixed,
            narrow_below: None,
            preserve_progress_on_resize: true,
            scene_weights: None,
        }
    }

    pub fn validate(&self) -> ScrollResult<()> {
        match &self.scene_weights {
            Some(w) => {
                if w.len() != self.scene_count {
                    return Err(ScrollError::config(format!(
                        "scene_weights has {} entries for {} scenes",
                        w.len(),
                        self.scene_count
                    )));
                }
                SceneTable::partition_weighted(w, self.overlap_fraction)?;
            }
            None => {
                SceneTable::partition(self.scene_count, self.overlap_fraction)?;
            }
        }

        self.per_scene_distance.validate("per_scene_distance")?;
        self.min_extent.validate("min_extent")?;

        if !is_unit(self.min_scale) {
            return Err(ScrollError::config(format!(
                "min_scale must lie in [0, 1], got {}",
                self.min_scale
            )));
        }
        if !self.trigger.element.is_finite() || !self.trigger.viewport.is_finite() {
            return Err(ScrollError::config("trigger fractions must be finite"));
        }
        if let Some(w) = self.narrow_below {
            if !w.is_finite() || w <= 0.0 {
                return Err(ScrollError::config("narrow_below must be finite and > 0"));
            }
        }
        Ok(())
    }

    pub fn bounds(&self) -> StateBounds {
        StateBounds {
            min_scale: self.min_scale,
        }
    }
}

/// One region as written in a page config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegionSpec {
    pub id: String,
    pub config: RegionConfig,
    /// Either empty (scenes without layers) or exactly `config.scene_count` entries.
    #[serde(default)]
    pub scenes: Vec<SceneSpec>,
    /// Document layout used for offline simulation.
    #[serde(default)]
    pub layout: Option<StaticLayout>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Size,
    #[serde(default)]
    pub regions: Vec<RegionSpec>,
}

impl PageConfig {
    pub fn from_json_str(s: &str) -> ScrollResult<Self> {
        serde_json::from_str(s).map_err(|e| ScrollError::serde(e.to_string()))
    }

    pub fn from_path(path: &Path) -> ScrollResult<Self> {
        let s = fs::read_to_string(path)
            .with_context(|| format!("read page config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// A probe that lays regions out at their configured document positions.
    pub fn static_probe(&self) -> StaticProbe {
        let mut probe = StaticProbe::new(self.viewport.width);
        for spec in &self.regions {
            if let Some(layout) = spec.layout {
                probe.insert(spec.id.clone(), layout);
            }
        }
        probe
    }
}

#[cfg(test)]
#[path = "../../tests/unit/region/config.rs"]
mod tests;
