//! Boundary to the presentation layer. Everything upstream is presentation-agnostic.

use crate::{
    animation::layer::VisualState,
    eval::evaluator::EvaluatedFrame,
    foundation::core::LengthUnit,
    foundation::error::ScrollResult,
    pin::controller::{PinLayout, Placement},
};

/// Addresses one on-screen layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct LayerKey {
    pub region: String,
    pub scene: usize,
    pub layer: usize,
}

/// Sink contract for applying evaluated state to concrete nodes.
///
/// Ordering contract: within a frame, `begin_frame` comes first, then `apply_pin`, then
/// `apply_layer` in scene/layer order, then `end_frame`.
pub trait RenderAdapter {
    fn begin_frame(&mut self, _region: &str, _frame: &EvaluatedFrame) -> ScrollResult<()> {
        Ok(())
    }
    fn apply_pin(&mut self, region: &str, layout: &PinLayout) -> ScrollResult<()>;
    fn apply_layer(
        &mut self,
        key: &LayerKey,
        unit: LengthUnit,
        state: &VisualState,
    ) -> ScrollResult<()>;
    fn end_frame(&mut self, _region: &str) -> ScrollResult<()> {
        Ok(())
    }
}

/// Push one evaluated frame through `adapter`.
pub fn present(
    adapter: &mut dyn RenderAdapter,
    region: &str,
    frame: &EvaluatedFrame,
    pin: &PinLayout,
) -> ScrollResult<()> {
    adapter.begin_frame(region, frame)?;
    adapter.apply_pin(region, pin)?;
    for scene in &frame.scenes {
        for (i, layer) in scene.layers.iter().enumerate() {
            let key = LayerKey {
                region: region.to_owned(),
                scene: scene.index,
                layer: i,
            };
            adapter.apply_layer(&key, layer.unit, &layer.state)?;
        }
    }
    adapter.end_frame(region)
}

/// CSS `transform` value for `state`.
pub fn css_transform(state: &VisualState, unit: LengthUnit) -> String {
    let (ux, uy) = match unit {
        LengthUnit::Px => ("px", "px"),
        LengthUnit::Viewport => ("vw", "vh"),
    };
    format!(
        "translate3d({}{ux}, {}{uy}, 0) scale({})",
        fmt_num(state.x),
        fmt_num(state.y),
        fmt_num(state.scale)
    )
}

pub fn css_opacity(state: &VisualState) -> String {
    fmt_num(state.opacity)
}

/// CSS declarations for a pinned container.
pub fn css_pin(layout: &PinLayout) -> String {
    match layout.placement {
        Placement::Flow => "position: relative; top: 0px".to_owned(),
        Placement::Fixed { top } => format!("position: fixed; top: {}px", fmt_num(top)),
        Placement::Parked { offset } => {
            format!(
                "position: relative; transform: translateY({}px)",
                fmt_num(offset)
            )
        }
    }
}

// Four decimals, no trailing zeros, no "-0".
fn fmt_num(v: f64) -> String {
    let rounded = (v * 10_000.0).round() / 10_000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let s = format!("{rounded:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_owned()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AppliedLayer {
    pub key: LayerKey,
    pub unit: LengthUnit,
    pub state: VisualState,
}

/// In-memory adapter for tests and the CLI. Keeps only the latest frame per region.
#[derive(Debug, Default)]
pub struct RecordingAdapter {
    layers: Vec<AppliedLayer>,
    pins: Vec<(String, PinLayout)>,
    frames: u64,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> &[AppliedLayer] {
        &self.layers
    }

    pub fn layers_for<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a AppliedLayer> {
        self.layers.iter().filter(move |l| l.key.region == region)
    }

    pub fn pin(&self, region: &str) -> Option<&PinLayout> {
        self.pins
            .iter()
            .find(|(r, _)| r == region)
            .map(|(_, layout)| layout)
    }

    /// Completed frames across all regions.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderAdapter for RecordingAdapter {
    fn begin_frame(&mut self, region: &str, _frame: &EvaluatedFrame) -> ScrollResult<()> {
        self.layers.retain(|l| l.key.region != region);
        Ok(())
    }

    fn apply_pin(&mut self, region: &str, layout: &PinLayout) -> ScrollResult<()> {
        match self.pins.iter_mut().find(|(r, _)| r == region) {
            Some(slot) => slot.1 = *layout,
            None => self.pins.push((region.to_owned(), *layout)),
        }
        Ok(())
    }

    fn apply_layer(
        &mut self,
        key: &LayerKey,
        unit: LengthUnit,
        state: &VisualState,
    ) -> ScrollResult<()> {
        self.layers.push(AppliedLayer {
            key: key.clone(),
            unit,
            state: *state,
        });
        Ok(())
    }

    fn end_frame(&mut self, _region: &str) -> ScrollResult<()> {
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/adapter.rs"]
mod tests;
