use crate::{
    animation::interp::{StateBounds, layer_state, local_progress, settled_state},
    animation::layer::{LayerKind, VisualState},
    foundation::core::{LengthUnit, Window},
    foundation::error::{ScrollError, ScrollResult},
    foundation::math::Fnv1a64,
    progress::source::Progress,
    timeline::scene::{Scene, SceneTable},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Every layer of every scene, evaluated for one progress value.
pub struct EvaluatedFrame {
    /// Progress the frame was evaluated at.
    pub progress: Progress,
    /// Scene that visibly dominates.
    pub dominant: usize,
    /// Scenes in table order.
    pub scenes: Vec<EvaluatedScene>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One scene's local progress and layer states.
pub struct EvaluatedScene {
    pub index: usize,
    pub window: Window,
    /// Scene-local progress in `[0, 1]`.
    pub local: f64,
    /// True while region progress lies inside the scene window.
    pub live: bool,
    pub layers: Vec<EvaluatedLayer>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Renderer-facing record for one layer.
pub struct EvaluatedLayer {
    pub name: String,
    pub kind: LayerKind,
    pub unit: LengthUnit,
    pub state: VisualState,
}

impl EvaluatedFrame {
    /// Stable hash of every numeric output, bit for bit.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        match self.progress {
            Progress::Unmeasured => h.write_u8(0),
            Progress::Degenerate => h.write_u8(1),
            Progress::Value(v) => {
                h.write_u8(2);
                h.write_f64(v);
            }
        }
        h.write_u64(self.dominant as u64);
        for scene in &self.scenes {
            h.write_u64(scene.index as u64);
            h.write_f64(scene.local);
            h.write_u8(u8::from(scene.live));
            for layer in &scene.layers {
                h.write_bytes(layer.name.as_bytes());
                h.write_f64(layer.state.x);
                h.write_f64(layer.state.y);
                h.write_f64(layer.state.scale);
                h.write_f64(layer.state.opacity);
            }
        }
        h.finish()
    }

    pub fn layer(&self, scene: usize, name: &str) -> Option<&EvaluatedLayer> {
        self.scenes
            .get(scene)?
            .layers
            .iter()
            .find(|l| l.name == name)
    }
}

/// Stateless evaluator from scene table and progress to per-layer states.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(table))]
    pub fn eval_frame(
        table: &SceneTable,
        progress: Progress,
        bounds: StateBounds,
    ) -> ScrollResult<EvaluatedFrame> {
        let last = table.len().saturating_sub(1);
        match progress {
            Progress::Unmeasured => Err(ScrollError::measurement(
                "region has not been measured yet",
            )),
            Progress::Degenerate => Ok(EvaluatedFrame {
                progress,
                dominant: last,
                scenes: table
                    .scenes()
                    .iter()
                    .map(|scene| settled_scene(scene, scene.index == last, bounds))
                    .collect(),
            }),
            Progress::Value(p) => Ok(EvaluatedFrame {
                progress,
                dominant: table.dominant(p),
                scenes: table
                    .scenes()
                    .iter()
                    .map(|scene| eval_scene(scene, p, bounds))
                    .collect(),
            }),
        }
    }
}

fn eval_scene(scene: &Scene, progress: f64, bounds: StateBounds) -> EvaluatedScene {
    let local = local_progress(progress, scene.window);
    EvaluatedScene {
        index: scene.index,
        window: scene.window,
        local,
        live: scene.window.contains(progress),
        layers: scene
            .layers
            .iter()
            .map(|layer| EvaluatedLayer {
                name: layer.name.clone(),
                kind: layer.kind,
                unit: layer.unit,
                state: layer_state(local, layer, bounds),
            })
            .collect(),
    }
}

fn settled_scene(scene: &Scene, live: bool, bounds: StateBounds) -> EvaluatedScene {
    EvaluatedScene {
        index: scene.index,
        window: scene.window,
        local: 1.0,
        live,
        layers: scene
            .layers
            .iter()
            .map(|layer| EvaluatedLayer {
                name: layer.name.clone(),
                kind: layer.kind,
                unit: layer.unit,
                state: settled_state(layer, bounds),
            })
            .collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
