use crate::{
    animation::ease::Ease,
    foundation::core::{LengthUnit, Window},
    foundation::error::{ScrollError, ScrollResult},
};

/// Per-layer visual record handed to the renderer each frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualState {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl Default for VisualState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl VisualState {
    /// At rest: no offset, full size, fully visible.
    pub const IDENTITY: VisualState = VisualState {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };

    pub fn new(x: f64, y: f64, scale: f64, opacity: f64) -> Self {
        Self {
            x,
            y,
            scale,
            opacity,
        }
    }

    pub fn hidden() -> Self {
        Self {
            opacity: 0.0,
            ..Self::IDENTITY
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.scale.is_finite() && self.opacity.is_finite()
    }
}

/// What a layer depicts. Informational for renderers; interpolation ignores it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LayerKind {
    Image,
    Heading,
    Bullets,
    Card,
    #[default]
    Other,
}

/// Trailing transition from `target` to `state`, played inside `window` of the
/// scene's local progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExitPhase {
    pub window: Window,
    pub state: VisualState,
    #[serde(default)]
    pub ease: Ease,
}

/// One independently animated element of a scene.
///
/// A layer travels `origin -> target` inside its `enter` sub-window and, when an
/// `exit` is set, `target -> exit.state` inside the exit sub-window. Both windows
/// are fractions of the owning scene's local progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    pub name: String,
    #[serde(default)]
    pub kind: LayerKind,
    #[serde(default)]
    pub unit: LengthUnit,
    pub origin: VisualState,
    pub target: VisualState,
    #[serde(default)]
    pub ease: Ease,
    #[serde(default)]
    pub enter: Option<Window>,
    #[serde(default)]
    pub exit: Option<ExitPhase>,
}

impl Layer {
    pub fn new(name: impl Into<String>, origin: VisualState, target: VisualState) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Other,
            unit: LengthUnit::Px,
            origin,
            target,
            ease: Ease::Linear,
            enter: None,
            exit: None,
        }
    }

    pub fn with_kind(mut self, kind: LayerKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_unit(mut self, unit: LengthUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_enter(mut self, window: Window) -> Self {
        self.enter = Some(window);
        self
    }

    pub fn with_exit(mut self, window: Window, state: VisualState, ease: Ease) -> Self {
        self.exit = Some(ExitPhase {
            window,
            state,
            ease,
        });
        self
    }

    pub fn enter_window(&self) -> Window {
        self.enter.unwrap_or(Window::FULL)
    }

    pub fn validate(&self) -> ScrollResult<()> {
        let named = |msg: &str| ScrollError::config(format!("layer '{}': {msg}", self.name));
        let scoped = |e: ScrollError| match e {
            ScrollError::Config(msg) => named(&msg),
            other => other,
        };

        if !self.origin.is_finite() || !self.target.is_finite() {
            return Err(named("origin and target must be finite"));
        }
        self.ease.validate().map_err(scoped)?;

        let enter = self.enter_window();
        enter.validate().map_err(scoped)?;

        if let Some(exit) = &self.exit {
            exit.window.validate().map_err(scoped)?;
            exit.ease.validate().map_err(scoped)?;
            if !exit.state.is_finite() {
                return Err(named("exit state must be finite"));
            }
            if enter.end > exit.window.start {
                return Err(named("enter window must finish before the exit window starts"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/layer.rs"]
mod tests;
