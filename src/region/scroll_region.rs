use crate::{
    animation::interp::StateBounds,
    eval::evaluator::{EvaluatedFrame, Evaluator},
    foundation::core::{Rect, Size},
    foundation::error::{ScrollError, ScrollResult},
    foundation::math::clamp01,
    pin::controller::{PinController, PinLayout, PinState},
    progress::source::{Geometry, Progress, ProgressSource},
    region::config::RegionConfig,
    timeline::scene::{SceneSpec, SceneTable},
};

/// Corrections smaller than this are not worth a scroll jump.
const CORRECTION_EPSILON_PX: f64 = 0.5;

/// Scroll offset the host should move to so a resized, pinned region keeps its progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScrollCorrection {
    pub region: String,
    pub offset: f64,
}

/// Output of one region update.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RegionFrame {
    pub frame: EvaluatedFrame,
    pub pin: PinLayout,
}

/// One pinned, scroll-driven sequence: scene table, progress source and pin controller.
///
/// Configuration is fixed at construction. Runtime state (offset, geometry, pin state)
/// only changes through `on_scroll`, `remeasure` and `update`.
#[derive(Clone, Debug)]
pub struct ScrollRegion {
    id: String,
    config: RegionConfig,
    table: SceneTable,
    source: ProgressSource,
    pin: PinController,
    bounds: StateBounds,
    offset: f64,
    needs_measure: bool,
}

impl ScrollRegion {
    /// Validate `config` and build the region. `scenes` is either empty (scenes without
    /// layers) or holds exactly `config.scene_count` entries.
    pub fn new(
        id: impl Into<String>,
        config: RegionConfig,
        scenes: Vec<SceneSpec>,
    ) -> ScrollResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(ScrollError::config("region id must not be empty"));
        }
        config.validate()?;

        let specs = if scenes.is_empty() {
            vec![SceneSpec::default(); config.scene_count]
        } else if scenes.len() != config.scene_count {
            return Err(ScrollError::config(format!(
                "{} scene specs for scene_count {}",
                scenes.len(),
                config.scene_count
            )));
        } else {
            scenes
        };

        let table = SceneTable::from_specs(
            specs,
            config.scene_weights.as_deref(),
            config.overlap_fraction,
        )?;
        let source = ProgressSource::new(config.scene_count, config.per_scene_distance)
            .with_min_extent(config.min_extent)
            .with_trigger(config.trigger)
            .with_reduced_motion(config.reduced_motion)
            .with_narrow_below(config.narrow_below);

        Ok(Self {
            pin: PinController::new(config.pin),
            bounds: config.bounds(),
            id,
            config,
            table,
            source,
            offset: 0.0,
            needs_measure: true,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    pub fn table(&self) -> &SceneTable {
        &self.table
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.source.geometry()
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn pin(&self) -> &PinController {
        &self.pin
    }

    pub fn pin_state(&self) -> PinState {
        self.pin.state()
    }

    /// Current progress at the last recorded offset.
    pub fn progress(&self) -> Progress {
        self.source.progress(self.offset)
    }

    /// Record the latest scroll offset. Non-finite offsets are dropped.
    pub fn on_scroll(&mut self, offset: f64) {
        if offset.is_finite() {
            self.offset = offset;
        }
    }

    /// Mark the geometry stale; the next frame re-reads the anchor.
    pub fn invalidate(&mut self) {
        self.needs_measure = true;
    }

    pub fn needs_measure(&self) -> bool {
        self.needs_measure
    }

    pub fn set_reduced_motion(&mut self, on: bool) {
        self.config.reduced_motion = on;
        self.source.set_reduced_motion(on);
    }

    /// Measure against a fresh anchor rect taken at the current offset.
    ///
    /// Progress is recomputed from the new geometry. If the region was pinned and
    /// `preserve_progress_on_resize` is set, the returned correction names the offset
    /// at which the pre-resize progress would be restored.
    pub fn remeasure(
        &mut self,
        anchor: Rect,
        viewport: Size,
        container_height: Option<f64>,
    ) -> ScrollResult<Option<ScrollCorrection>> {
        let before = self.progress().value();
        let was_pinned = self.pin.state().is_fixed();

        let geometry = self.source.measure(anchor, viewport, self.offset)?;
        self.pin
            .set_container_height(container_height.unwrap_or_else(|| anchor.height()));
        self.needs_measure = false;

        tracing::debug!(
            region = %self.id,
            start = geometry.start,
            extent = geometry.extent,
            "region measured"
        );

        if !(was_pinned && self.config.preserve_progress_on_resize) || geometry.is_degenerate()
        {
            return Ok(None);
        }
        let Some(p) = before else {
            return Ok(None);
        };
        let target = geometry.start + p * geometry.extent;
        if (target - self.offset).abs() <= CORRECTION_EPSILON_PX {
            return Ok(None);
        }
        Ok(Some(ScrollCorrection {
            region: self.id.clone(),
            offset: target,
        }))
    }

    /// Evaluate all layers and advance the pin state machine for the current offset.
    ///
    /// Fails with [`ScrollError::Measurement`] while the region is unmeasured; the pin
    /// state is left untouched in that case.
    pub fn update(&mut self) -> ScrollResult<RegionFrame> {
        let frame = self.frame()?;
        let pin = self.pin.update(self.offset, self.source.geometry());
        Ok(RegionFrame { frame, pin })
    }

    /// Evaluate at the current offset without advancing the pin state machine.
    pub fn frame(&self) -> ScrollResult<EvaluatedFrame> {
        Evaluator::eval_frame(&self.table, self.progress(), self.bounds)
    }

    /// Evaluate at an explicit progress without touching runtime state (scrubbing).
    pub fn evaluate(&self, progress: f64) -> ScrollResult<EvaluatedFrame> {
        let degenerate = self.source.reduced_motion()
            || self.source.geometry().is_some_and(Geometry::is_degenerate);
        let progress = if degenerate {
            Progress::Degenerate
        } else {
            Progress::Value(clamp01(progress))
        };
        Evaluator::eval_frame(&self.table, progress, self.bounds)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/region/scroll_region.rs"]
mod tests;
