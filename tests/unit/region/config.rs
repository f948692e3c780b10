use super::*;

#[test]
fn minimal_json_fills_defaults() {
    let cfg: RegionConfig = serde_json::from_str(r#"{"scene_count": 3}"#).unwrap();
    assert_eq!(cfg, RegionConfig::new(3));
    assert_eq!(cfg.per_scene_distance, Distance::Viewport(1.0));
    assert!(cfg.preserve_progress_on_resize);
    assert!(cfg.validate().is_ok());
}

#[test]
fn full_json_round_trips_fields() {
    let cfg: RegionConfig = serde_json::from_str(
        r#"{
            "scene_count": 4,
            "overlap_fraction": 0.2,
            "per_scene_distance": {"Px": 600.0},
            "min_extent": {"Viewport": 2.0},
            "reduced_motion": true,
            "trigger": {"element": 0.0, "viewport": 0.5},
            "min_scale": 0.6,
            "pin": "Unsupported",
            "narrow_below": 768.0,
            "preserve_progress_on_resize": false,
            "scene_weights": [1.0, 1.0, 2.0, 1.0]
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.per_scene_distance, Distance::Px(600.0));
    assert_eq!(cfg.pin, PinSupport::Unsupported);
    assert_eq!(cfg.trigger, TriggerPoint::TOP_CENTER);
    assert_eq!(cfg.bounds().min_scale, 0.6);
    assert!(cfg.validate().is_ok());
}

#[test]
fn validation_catches_each_bad_field() {
    let base = RegionConfig::new(3);
    let cases = [
        RegionConfig {
            scene_count: 0,
            ..base.clone()
        },
        RegionConfig {
            overlap_fraction: 0.5,
            ..base.clone()
        },
        RegionConfig {
            per_scene_distance: Distance::Px(-1.0),
            ..base.clone()
        },
        RegionConfig {
            min_scale: 1.5,
            ..base.clone()
        },
        RegionConfig {
            narrow_below: Some(0.0),
            ..base.clone()
        },
        RegionConfig {
            scene_weights: Some(vec![1.0, 1.0]),
            ..base.clone()
        },
        RegionConfig {
            trigger: TriggerPoint {
                element: f64::NAN,
                viewport: 0.0,
            },
            ..base.clone()
        },
    ];
    for cfg in cases {
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ScrollError::Config(_)), "{cfg:?}");
    }
}

#[test]
fn page_config_parses_and_builds_probe() {
    let cfg = PageConfig::from_json_str(
        r#"{
            "viewport": {"width": 1440.0, "height": 900.0},
            "regions": [
                {"id": "features", "config": {"scene_count": 2},
                 "layout": {"top": 900.0, "height": 900.0}},
                {"id": "benefits", "config": {"scene_count": 3}}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.regions.len(), 2);
    let probe = cfg.static_probe();
    assert!(probe.layout("features").is_some());
    assert!(probe.layout("benefits").is_none());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = PageConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ScrollError::Serde(_)));
}

#[test]
fn missing_file_is_wrapped() {
    let err = PageConfig::from_path(Path::new("does/not/exist.json")).unwrap_err();
    assert!(err.to_string().contains("read page config"));
}
