use super::*;
use crate::animation::ops::fade_up;

#[test]
fn three_scenes_without_overlap_split_in_thirds() {
    let w = SceneTable::partition(3, 0.0).unwrap();
    assert_eq!(w[0], Window::new(0.0, 1.0 / 3.0).unwrap());
    assert_eq!(w[1], Window::new(1.0 / 3.0, 2.0 / 3.0).unwrap());
    assert_eq!(w[2], Window::new(2.0 / 3.0, 1.0).unwrap());
}

#[test]
fn overlap_widens_inner_edges_only() {
    let w = SceneTable::partition(4, 0.2).unwrap();
    assert_eq!(w[0].start, 0.0);
    assert_eq!(w[3].end, 1.0);
    // Inner edges grow by 0.2 * 0.25 = 0.05.
    assert!((w[0].end - 0.30).abs() < 1e-12);
    assert!((w[1].start - 0.20).abs() < 1e-12);
    assert!((w[1].end - 0.55).abs() < 1e-12);
    assert!(w[0].overlaps(w[1]));
    assert!(!w[0].overlaps(w[2]));
}

#[test]
fn windows_are_ordered_and_cover_unit_range() {
    for n in 1..=12usize {
        for f in [0.0, 0.1, 0.25, 0.4, 0.49] {
            let w = SceneTable::partition(n, f).unwrap();
            assert_eq!(w.len(), n);
            assert_eq!(w[0].start, 0.0);
            assert_eq!(w[n - 1].end, 1.0);
            for pair in w.windows(2) {
                assert!(pair[0].start < pair[1].start, "n={n} f={f}");
                assert!(pair[0].end <= pair[1].end, "n={n} f={f}");
                assert!(pair[0].end >= pair[1].start, "gap at n={n} f={f}");
            }
            for i in 0..=1000 {
                let p = f64::from(i) / 1000.0;
                assert!(w.iter().any(|win| win.contains(p)), "uncovered p={p} n={n} f={f}");
            }
        }
    }
}

#[test]
fn at_most_two_scenes_are_live_at_once() {
    let table = SceneTable::new(5, 0.45).unwrap();
    for i in 0..=500 {
        let p = f64::from(i) / 500.0;
        let live = table.live(p).count();
        assert!((1..=2).contains(&live), "p={p} live={live}");
    }
}

#[test]
fn invalid_configuration_is_rejected() {
    assert!(SceneTable::partition(0, 0.0).is_err());
    assert!(SceneTable::partition(3, 0.5).is_err());
    assert!(SceneTable::partition(3, 0.75).is_err());
    assert!(SceneTable::partition(3, -0.1).is_err());
    assert!(SceneTable::partition(3, f64::NAN).is_err());
    assert!(SceneTable::new(0, 0.1).is_err());
    assert!(SceneTable::partition_weighted(&[1.0, 0.0], 0.1).is_err());
    assert!(SceneTable::partition_weighted(&[], 0.1).is_err());
}

#[test]
fn weighted_partition_follows_weights() {
    let w = SceneTable::partition_weighted(&[1.0, 2.0, 1.0], 0.0).unwrap();
    assert_eq!(w[0], Window::new(0.0, 0.25).unwrap());
    assert_eq!(w[1], Window::new(0.25, 0.75).unwrap());
    assert_eq!(w[2], Window::new(0.75, 1.0).unwrap());

    let o = SceneTable::partition_weighted(&[1.0, 2.0, 1.0], 0.4).unwrap();
    // Cross-fade half-width uses the smaller neighbour: 0.4 * 0.25.
    assert!((o[0].end - 0.35).abs() < 1e-12);
    assert!((o[1].start - 0.15).abs() < 1e-12);
}

#[test]
fn dominant_scene_follows_core_boundaries() {
    let table = SceneTable::new(3, 0.3).unwrap();
    assert_eq!(table.dominant(-0.2), 0);
    assert_eq!(table.dominant(0.0), 0);
    assert_eq!(table.dominant(0.34), 1);
    assert_eq!(table.dominant(0.5), 1);
    assert_eq!(table.dominant(0.99), 2);
    assert_eq!(table.dominant(1.0), 2);
    assert_eq!(table.dominant(1.7), 2);
    assert_eq!(table.dominant(f64::NAN), 0);
}

#[test]
fn specs_attach_layers_in_order() {
    let specs = vec![
        SceneSpec {
            layers: vec![fade_up("a", 10.0)],
        },
        SceneSpec {
            layers: vec![fade_up("b", 10.0), fade_up("c", 10.0)],
        },
    ];
    let table = SceneTable::from_specs(specs, None, 0.1).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.layer_count(), 3);
    assert_eq!(table.get(1).unwrap().index, 1);
    assert_eq!(table.get(1).unwrap().layers[1].name, "c");
}

#[test]
fn invalid_layer_fails_its_table() {
    let mut bad = fade_up("bad", 10.0);
    bad.origin.opacity = f64::INFINITY;
    let err = SceneTable::from_specs(vec![SceneSpec { layers: vec![bad] }], None, 0.0)
        .unwrap_err();
    assert!(err.to_string().contains("scene 0"));
}

#[test]
fn weight_count_must_match_scene_count() {
    let specs = vec![SceneSpec::default(), SceneSpec::default()];
    assert!(SceneTable::from_specs(specs, Some(&[1.0]), 0.0).is_err());
}
