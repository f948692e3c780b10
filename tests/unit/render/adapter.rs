use super::*;
use crate::animation::interp::StateBounds;
use crate::animation::ops::{fade_up, slide_x};
use crate::eval::evaluator::Evaluator;
use crate::pin::controller::{PinSide, PinState};
use crate::progress::source::Progress;
use crate::timeline::scene::{SceneSpec, SceneTable};

fn frame(p: f64) -> EvaluatedFrame {
    let table = SceneTable::from_specs(
        vec![
            SceneSpec {
                layers: vec![fade_up("a", 20.0), slide_x("b", -10.0)],
            },
            SceneSpec {
                layers: vec![fade_up("c", 20.0)],
            },
        ],
        None,
        0.0,
    )
    .unwrap();
    Evaluator::eval_frame(&table, Progress::Value(p), StateBounds::default()).unwrap()
}

fn pinned() -> PinLayout {
    PinLayout {
        state: PinState::Pinned,
        side: PinSide::Inside,
        placement: Placement::Fixed { top: 0.0 },
        spacer_height: 2400.0,
    }
}

#[test]
fn present_visits_every_layer_in_order() {
    let mut rec = RecordingAdapter::new();
    present(&mut rec, "features", &frame(0.25), &pinned()).unwrap();

    let keys: Vec<(usize, usize)> = rec.layers().iter().map(|l| (l.key.scene, l.key.layer)).collect();
    assert_eq!(keys, vec![(0, 0), (0, 1), (1, 0)]);
    assert_eq!(rec.layers()[1].unit, LengthUnit::Viewport);
    assert_eq!(rec.pin("features").unwrap().state, PinState::Pinned);
    assert_eq!(rec.frames(), 1);
}

#[test]
fn recording_keeps_latest_frame_per_region() {
    let mut rec = RecordingAdapter::new();
    present(&mut rec, "a", &frame(0.1), &pinned()).unwrap();
    present(&mut rec, "b", &frame(0.1), &pinned()).unwrap();
    present(&mut rec, "a", &frame(0.9), &pinned()).unwrap();

    assert_eq!(rec.layers_for("a").count(), 3);
    assert_eq!(rec.layers_for("b").count(), 3);
    assert_eq!(rec.frames(), 3);
    let c = rec
        .layers_for("a")
        .find(|l| l.key.scene == 1)
        .unwrap();
    assert!(c.state.opacity > 0.0);
}

#[test]
fn css_helpers_format_compactly() {
    let s = VisualState::new(12.0, -0.00001, 0.95, 0.5);
    assert_eq!(css_transform(&s, LengthUnit::Px), "translate3d(12px, 0px, 0) scale(0.95)");
    assert_eq!(
        css_transform(&VisualState::new(-10.0, 2.5, 1.0, 1.0), LengthUnit::Viewport),
        "translate3d(-10vw, 2.5vh, 0) scale(1)"
    );
    assert_eq!(css_opacity(&s), "0.5");
}

#[test]
fn css_pin_matches_placement() {
    assert_eq!(css_pin(&pinned()), "position: fixed; top: 0px");
    let parked = PinLayout {
        placement: Placement::Parked { offset: 1600.0 },
        ..pinned()
    };
    assert_eq!(
        css_pin(&parked),
        "position: relative; transform: translateY(1600px)"
    );
}

struct Failing;

impl RenderAdapter for Failing {
    fn apply_pin(&mut self, _region: &str, _layout: &PinLayout) -> ScrollResult<()> {
        Ok(())
    }

    fn apply_layer(
        &mut self,
        _key: &LayerKey,
        _unit: LengthUnit,
        _state: &VisualState,
    ) -> ScrollResult<()> {
        Err(crate::foundation::error::ScrollError::Other(anyhow::anyhow!(
            "node detached"
        )))
    }
}

#[test]
fn adapter_errors_propagate_from_present() {
    let err = present(&mut Failing, "r", &frame(0.5), &pinned()).unwrap_err();
    assert!(err.to_string().contains("node detached"));
}
