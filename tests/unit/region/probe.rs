use super::*;

#[test]
fn rects_follow_scroll_offset() {
    let mut probe = StaticProbe::new(1280.0);
    probe.insert("hero", StaticLayout::new(800.0, 600.0));

    let r = probe.anchor_rect("hero").unwrap();
    assert_eq!((r.y0, r.y1, r.width()), (800.0, 1400.0, 1280.0));

    probe.set_offset(500.0);
    let r = probe.anchor_rect("hero").unwrap();
    assert_eq!((r.y0, r.y1), (300.0, 900.0));
}

#[test]
fn unknown_region_is_unmounted() {
    let mut probe = StaticProbe::new(1280.0);
    assert!(probe.anchor_rect("nope").is_none());
    assert!(probe.container_height("nope").is_none());

    probe.insert("a", StaticLayout::new(0.0, 10.0));
    assert!(probe.remove("a").is_some());
    assert!(probe.anchor_rect("a").is_none());
}

#[test]
fn container_height_defaults_to_anchor_height() {
    let mut probe = StaticProbe::new(1000.0);
    probe.insert("a", StaticLayout::new(0.0, 700.0));
    probe.insert(
        "b",
        StaticLayout {
            top: 0.0,
            height: 10.0,
            container_height: Some(900.0),
        },
    );
    assert_eq!(probe.container_height("a"), Some(700.0));
    assert_eq!(probe.container_height("b"), Some(900.0));
}
