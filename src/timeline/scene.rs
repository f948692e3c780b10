use crate::{
    animation::layer::Layer,
    foundation::core::Window,
    foundation::error::{ScrollError, ScrollResult},
};

/// Largest overlap fraction that keeps window starts strictly ordered.
pub const MAX_OVERLAP: f64 = 0.5;

/// One discrete visual beat. Built once at region setup and only read afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Scene {
    pub index: usize,
    pub window: Window,
    pub layers: Vec<Layer>,
}

/// Layer list for one scene, as written in configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneSpec {
    #[serde(default)]
    pub layers: Vec<Layer>,
}

/// Ordered, immutable scene list covering progress `[0, 1]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneTable {
    scenes: Vec<Scene>,
    overlap: f64,
    // Boundaries between scene cores: `bounds[i]..bounds[i + 1]` is scene i without overlap.
    bounds: Vec<f64>,
}

impl SceneTable {
    /// Equal-length windows: scene `i` of `n` owns `[i/n, (i+1)/n)`, widened by
    /// `overlap / n` on each inner edge.
    pub fn partition(scene_count: usize, overlap: f64) -> ScrollResult<Vec<Window>> {
        if scene_count < 1 {
            return Err(ScrollError::config("scene count must be >= 1"));
        }
        Self::partition_weighted(&vec![1.0; scene_count], overlap)
    }

    /// Windows proportional to `weights`. Each inner boundary gets a cross-fade of
    /// half-width `overlap * min(left, right)`; the outer edges stay at 0 and 1.
    pub fn partition_weighted(weights: &[f64], overlap: f64) -> ScrollResult<Vec<Window>> {
        let bounds = core_bounds(weights)?;
        check_overlap(overlap)?;

        let n = weights.len();
        let half_width = |k: usize| -> f64 {
            if k == 0 || k == n {
                return 0.0;
            }
            let left = bounds[k] - bounds[k - 1];
            let right = bounds[k + 1] - bounds[k];
            overlap * left.min(right)
        };

        (0..n)
            .map(|i| {
                let start = (bounds[i] - half_width(i)).max(0.0);
                let end = (bounds[i + 1] + half_width(i + 1)).min(1.0);
                Window::new(start, end)
            })
            .collect()
    }

    /// A table of `scene_count` scenes with no layers.
    pub fn new(scene_count: usize, overlap: f64) -> ScrollResult<Self> {
        if scene_count < 1 {
            return Err(ScrollError::config("scene count must be >= 1"));
        }
        Self::build(vec![SceneSpec::default(); scene_count], None, overlap)
    }

    /// Validate `specs` and partition progress among them.
    pub fn from_specs(
        specs: Vec<SceneSpec>,
        weights: Option<&[f64]>,
        overlap: f64,
    ) -> ScrollResult<Self> {
        Self::build(specs, weights, overlap)
    }

    fn build(specs: Vec<SceneSpec>, weights: Option<&[f64]>, overlap: f64) -> ScrollResult<Self> {
        if specs.is_empty() {
            return Err(ScrollError::config("scene count must be >= 1"));
        }
        let owned;
        let weights = match weights {
            Some(w) => {
                if w.len() != specs.len() {
                    return Err(ScrollError::config(format!(
                        "scene_weights has {} entries for {} scenes",
                        w.len(),
                        specs.len()
                    )));
                }
                w
            }
            None => {
                owned = vec![1.0; specs.len()];
                &owned
            }
        };

        let windows = Self::partition_weighted(weights, overlap)?;
        let bounds = core_bounds(weights)?;

        let mut scenes = Vec::with_capacity(specs.len());
        for (index, (spec, window)) in specs.into_iter().zip(windows).enumerate() {
            for layer in &spec.layers {
                layer.validate().map_err(|e| match e {
                    ScrollError::Config(msg) => ScrollError::config(format!("scene {index}: {msg}")),
                    other => other,
                })?;
            }
            scenes.push(Scene {
                index,
                window,
                layers: spec.layers,
            });
        }

        Ok(Self {
            scenes,
            overlap,
            bounds,
        })
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    pub fn overlap(&self) -> f64 {
        self.overlap
    }

    pub fn layer_count(&self) -> usize {
        self.scenes.iter().map(|s| s.layers.len()).sum()
    }

    /// The one scene that visibly dominates at `progress`: the scene whose
    /// overlap-free core contains it. Progress outside `[0, 1]` pins to the ends.
    pub fn dominant(&self, progress: f64) -> usize {
        let last = self.scenes.len().saturating_sub(1);
        if progress.is_nan() || progress <= 0.0 {
            return 0;
        }
        if progress >= 1.0 {
            return last;
        }
        // bounds[0] == 0, bounds[n] == 1; count inner boundaries at or below progress.
        let idx = self.bounds[1..self.bounds.len() - 1].partition_point(|&b| b <= progress);
        idx.min(last)
    }

    /// Scenes whose windows contain `progress` (more than one inside a cross-fade).
    pub fn live(&self, progress: f64) -> impl Iterator<Item = &Scene> {
        self.scenes
            .iter()
            .filter(move |s| s.window.contains(progress))
    }
}

fn check_overlap(overlap: f64) -> ScrollResult<()> {
    if !overlap.is_finite() || overlap < 0.0 {
        return Err(ScrollError::config(format!(
            "overlap fraction must be finite and >= 0, got {overlap}"
        )));
    }
    if overlap >= MAX_OVERLAP {
        return Err(ScrollError::config(format!(
            "overlap fraction must be < {MAX_OVERLAP}, got {overlap}"
        )));
    }
    Ok(())
}

// Normalized cumulative boundaries `[0, .., 1]`, one more than `weights`.
fn core_bounds(weights: &[f64]) -> ScrollResult<Vec<f64>> {
    if weights.is_empty() {
        return Err(ScrollError::config("scene count must be >= 1"));
    }
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w <= 0.0) {
        return Err(ScrollError::config(format!(
            "scene weights must be finite and > 0, got {bad}"
        )));
    }

    let total: f64 = weights.iter().sum();
    let mut bounds = Vec::with_capacity(weights.len() + 1);
    let mut acc = 0.0;
    bounds.push(0.0);
    for w in &weights[..weights.len() - 1] {
        acc += w;
        bounds.push(acc / total);
    }
    bounds.push(1.0);
    Ok(bounds)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scene.rs"]
mod tests;
