use super::*;

const VIEWPORT: Size = Size {
    width: 1280.0,
    height: 800.0,
};

// Anchor sits 1200px down the document; measured while scrolled to the top.
fn anchor() -> Rect {
    Rect::new(0.0, 1200.0, 1280.0, 2000.0)
}

#[test]
fn unmeasured_until_first_measurement() {
    let src = ProgressSource::new(3, Distance::Px(500.0));
    assert_eq!(src.progress(0.0), Progress::Unmeasured);
    assert!(src.raw_progress(0.0).is_none());
}

#[test]
fn progress_runs_from_start_to_end_and_clamps() {
    let mut src = ProgressSource::new(3, Distance::Px(500.0));
    let g = src.measure(anchor(), VIEWPORT, 0.0).unwrap();
    assert_eq!(g.start, 1200.0);
    assert_eq!(g.extent, 1500.0);
    assert_eq!(g.end(), 2700.0);

    assert_eq!(src.progress(0.0), Progress::Value(0.0));
    assert_eq!(src.progress(1200.0), Progress::Value(0.0));
    assert_eq!(src.progress(1950.0), Progress::Value(0.5));
    assert_eq!(src.progress(2700.0), Progress::Value(1.0));
    assert_eq!(src.progress(9000.0), Progress::Value(1.0));
    assert_eq!(src.raw_progress(3450.0), Some(1.5));
    assert_eq!(src.raw_progress(450.0), Some(-0.5));
}

#[test]
fn measurement_is_independent_of_scroll_position() {
    let mut a = ProgressSource::new(2, Distance::Viewport(1.0));
    let mut b = a.clone();
    let ga = a.measure(anchor(), VIEWPORT, 0.0).unwrap();
    // Same element measured after scrolling 700px: it appears 700px higher.
    let gb = b
        .measure(Rect::new(0.0, 500.0, 1280.0, 1300.0), VIEWPORT, 700.0)
        .unwrap();
    assert_eq!(ga, gb);
}

#[test]
fn trigger_point_shifts_start() {
    let mut src = ProgressSource::new(1, Distance::Px(400.0)).with_trigger(TriggerPoint::TOP_CENTER);
    let g = src.measure(anchor(), VIEWPORT, 0.0).unwrap();
    assert_eq!(g.start, 800.0);
    assert_eq!(g.pin_top, 400.0);
}

#[test]
fn viewport_distance_and_floor() {
    let mut src = ProgressSource::new(2, Distance::Viewport(0.5))
        .with_min_extent(Distance::Px(1000.0));
    let g = src.measure(anchor(), VIEWPORT, 0.0).unwrap();
    assert_eq!(g.extent, 1000.0);

    let big = Size::new(1280.0, 1600.0);
    let g = src.measure(anchor(), big, 0.0).unwrap();
    assert_eq!(g.extent, 1600.0);
}

#[test]
fn zero_extent_is_degenerate_not_a_division() {
    let mut src = ProgressSource::new(3, Distance::Px(0.0));
    src.measure(anchor(), VIEWPORT, 0.0).unwrap();
    assert_eq!(src.progress(1500.0), Progress::Degenerate);
    assert!(src.raw_progress(1500.0).is_none());
}

#[test]
fn reduced_motion_and_narrow_layouts_are_degenerate() {
    let mut rm = ProgressSource::new(3, Distance::Px(500.0)).with_reduced_motion(true);
    rm.measure(anchor(), VIEWPORT, 0.0).unwrap();
    assert_eq!(rm.progress(1500.0), Progress::Degenerate);

    let mut narrow = ProgressSource::new(3, Distance::Px(500.0)).with_narrow_below(Some(768.0));
    narrow.measure(anchor(), Size::new(390.0, 844.0), 0.0).unwrap();
    assert_eq!(narrow.progress(1500.0), Progress::Degenerate);
    narrow.measure(anchor(), VIEWPORT, 0.0).unwrap();
    assert!(matches!(narrow.progress(1500.0), Progress::Value(_)));
}

#[test]
fn toggling_reduced_motion_rederives_extent() {
    let mut src = ProgressSource::new(3, Distance::Px(500.0));
    src.measure(anchor(), VIEWPORT, 0.0).unwrap();
    src.set_reduced_motion(true);
    assert_eq!(src.progress(1500.0), Progress::Degenerate);
    src.set_reduced_motion(false);
    assert_eq!(src.geometry().unwrap().extent, 1500.0);
}

#[test]
fn bad_measurements_are_measurement_errors() {
    let mut src = ProgressSource::new(3, Distance::Px(500.0));
    let err = src
        .measure(Rect::new(0.0, f64::NAN, 1.0, 1.0), VIEWPORT, 0.0)
        .unwrap_err();
    assert!(matches!(err, ScrollError::Measurement(_)));
    assert!(src.measure(anchor(), Size::new(0.0, 0.0), 0.0).is_err());
    assert!(src.measure(anchor(), VIEWPORT, f64::INFINITY).is_err());
    assert_eq!(src.progress(0.0), Progress::Unmeasured);
}

#[test]
fn distance_validation() {
    assert!(Distance::Px(10.0).validate("d").is_ok());
    assert!(Distance::Viewport(-1.0).validate("d").is_err());
    assert!(Distance::Px(f64::NAN).validate("d").is_err());
}
