use crate::{
    animation::ease::Ease,
    animation::layer::{Layer, LayerKind, VisualState},
    foundation::core::{LengthUnit, Window},
    foundation::error::{ScrollError, ScrollResult},
};

/// Rise by `distance_px` while fading in.
pub fn fade_up(name: impl Into<String>, distance_px: f64) -> Layer {
    Layer::new(
        name,
        VisualState::new(0.0, distance_px, 1.0, 0.0),
        VisualState::IDENTITY,
    )
    .with_ease(Ease::OutCubic)
}

/// Grow from `from_scale` while fading in.
pub fn scale_in(name: impl Into<String>, from_scale: f64) -> Layer {
    Layer::new(
        name,
        VisualState::new(0.0, 0.0, from_scale, 0.0),
        VisualState::IDENTITY,
    )
    .with_kind(LayerKind::Image)
    .with_ease(Ease::OutQuart)
}

/// Slide horizontally by `dx` viewport percent while fading in.
pub fn slide_x(name: impl Into<String>, dx: f64) -> Layer {
    Layer::new(
        name,
        VisualState::new(dx, 0.0, 1.0, 0.0),
        VisualState::IDENTITY,
    )
    .with_unit(LengthUnit::Viewport)
    .with_ease(Ease::InOutQuad)
}

/// Give each layer an entry window of length `span`, offset by `step` from the
/// previous one. Windows that would run past the scene end are shifted back so
/// every layer still fully arrives by local progress 1.
pub fn stagger(layers: &mut [Layer], step: f64, span: f64) -> ScrollResult<()> {
    if !step.is_finite() || step < 0.0 {
        return Err(ScrollError::config("stagger step must be finite and >= 0"));
    }
    if !span.is_finite() || span <= 0.0 || span > 1.0 {
        return Err(ScrollError::config("stagger span must be in (0, 1]"));
    }

    for (i, layer) in layers.iter_mut().enumerate() {
        let start = (i as f64 * step).min(1.0 - span);
        let end = start + span;
        let exit_start = layer.exit.as_ref().map(|e| e.window.start).unwrap_or(1.0);
        let end = end.min(exit_start);
        let start = start.min(end);
        layer.enter = Some(Window::new(start, end)?);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
