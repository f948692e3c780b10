//! Pure progress-to-state mapping.
//!
//! Nothing here keeps state: the same inputs always produce bit-identical output,
//! which is what makes scrubbing and resize-triggered recomputation safe.

use crate::{
    animation::layer::{Layer, VisualState},
    foundation::core::Window,
    foundation::math::{clamp01, lerp},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for VisualState {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            x: lerp(a.x, b.x, t),
            y: lerp(a.y, b.y, t),
            scale: lerp(a.scale, b.scale, t),
            opacity: lerp(a.opacity, b.opacity, t),
        }
    }
}

/// Output bounds applied after interpolation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StateBounds {
    /// Lower clamp for `scale`; the upper clamp is always 1.
    pub min_scale: f64,
}

impl Default for StateBounds {
    fn default() -> Self {
        Self { min_scale: 0.0 }
    }
}

impl StateBounds {
    pub fn apply(self, s: VisualState) -> VisualState {
        let min_scale = clamp01(self.min_scale);
        let scale = if s.scale.is_nan() {
            min_scale
        } else {
            s.scale.clamp(min_scale, 1.0)
        };
        VisualState {
            x: s.x,
            y: s.y,
            scale,
            opacity: clamp01(s.opacity),
        }
    }
}

/// Map `progress` linearly from `window` onto `[0, 1]`.
///
/// Before the window this is 0, after it 1, so a scene holds its initial or
/// terminal pose instead of jumping. An empty window acts as a step at `start`.
pub fn local_progress(progress: f64, window: Window) -> f64 {
    if progress.is_nan() {
        return 0.0;
    }
    if progress < window.start {
        return 0.0;
    }
    if progress >= window.end {
        return 1.0;
    }
    let len = window.len();
    if len <= 0.0 {
        return 1.0;
    }
    // Multiplying by the reciprocal keeps thirds, sixths etc. exact at their midpoints.
    clamp01((progress - window.start) * (1.0 / len))
}

/// Visual state of `layer` at scene-local progress `t`.
pub fn layer_state(t: f64, layer: &Layer, bounds: StateBounds) -> VisualState {
    let t = clamp01(t);

    let raw = match &layer.exit {
        Some(exit) if t >= exit.window.start => {
            let u = exit.ease.apply(local_progress(t, exit.window));
            VisualState::lerp(&layer.target, &exit.state, u)
        }
        _ => {
            let u = layer.ease.apply(local_progress(t, layer.enter_window()));
            VisualState::lerp(&layer.origin, &layer.target, u)
        }
    };

    bounds.apply(raw)
}

/// State a layer settles at when animation is skipped (reduced motion, degenerate region).
pub fn settled_state(layer: &Layer, bounds: StateBounds) -> VisualState {
    bounds.apply(layer.target)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
