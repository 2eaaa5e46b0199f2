use progress_ring::{
    CircularProgress, DrawCommand, Host, LineCap, ProgressAngles, WidgetConfig, FULL_ANGLE,
    MAX_SIZE, START_ANGLE,
};
use proptest::prelude::*;

fn host() -> Host {
    let mut host = Host::new();
    host.add_mount_point("main");
    host
}

fn widget_with(config: WidgetConfig) -> CircularProgress {
    CircularProgress::new(&mut host(), "main", "ring", config).unwrap()
}

fn widget() -> CircularProgress {
    widget_with(WidgetConfig::builder().size(120).build())
}

#[test]
fn test_construction_size_bounds() {
    let mut host = host();
    let err = CircularProgress::new(&mut host, "main", "a", WidgetConfig::builder().size(99).build())
        .unwrap_err();
    assert!(err.is_illegal_argument());
    assert!(host.find_surface("a").is_none());

    let ok = CircularProgress::new(&mut host, "main", "b", WidgetConfig::builder().size(100).build())
        .unwrap();
    assert_eq!(ok.size(), 100);
    assert_eq!(ok.surface().width(), 100);
}

#[test]
fn test_missing_mount_point_is_null_argument() {
    let mut host = Host::new();
    let err = CircularProgress::new(&mut host, "absent", "ring", WidgetConfig::default())
        .unwrap_err();
    assert!(err.is_null_argument());
}

#[test]
fn test_surface_is_attached_under_mount_point() {
    let mut host = host();
    let ring = CircularProgress::new(&mut host, "main", "upload", WidgetConfig::default()).unwrap();
    assert_eq!(ring.surface_id(), "upload");
    assert_eq!(host.find_surface("upload"), Some("main"));
}

#[test]
fn test_invalid_font_data_rejected() {
    let config = WidgetConfig::builder().font_data(vec![1, 2, 3]).build();
    let err = CircularProgress::new(&mut host(), "main", "ring", config).unwrap_err();
    assert!(err.is_illegal_argument());
}

#[test]
fn test_label_boundaries() {
    let mut ring = widget();
    for (progress, expected) in [(98.9, "98%"), (99.4, "99%"), (99.5, "100%"), (7.0, "07%")] {
        ring.set_progress(progress).unwrap();
        assert_eq!(ring.formatted_progress(), expected, "progress {}", progress);
    }

    ring.set_float_mode(true);
    ring.set_progress(49.4).unwrap();
    assert_eq!(ring.formatted_progress(), "49.4%");
    ring.set_progress(100.0).unwrap();
    assert_eq!(ring.formatted_progress(), "100%");

    ring.set_percent_sign_visible(false);
    assert_eq!(ring.formatted_progress(), "100");
}

#[test]
fn test_out_of_range_progress_is_rejected() {
    let mut ring = widget();
    ring.set_progress(42.0).unwrap();
    assert!(ring.set_progress(101.0).unwrap_err().is_illegal_argument());
    assert!(ring.set_progress(-1.0).unwrap_err().is_illegal_argument());
    assert_eq!(ring.progress(), 42.0);
    assert_eq!(ring.formatted_progress(), "42%");
}

#[test]
fn test_zero_progress_round_cap_strokes_butt() {
    let mut ring = widget();
    ring.set_line_cap_style(LineCap::STYLE_LINE_ROUND);
    assert_eq!(ring.line_cap(), LineCap::Round);
    assert_eq!(ring.resolved_line_cap(), LineCap::Butt);
    let progress_arc = ring.scene().arcs().last().cloned();
    assert!(matches!(
        progress_arc,
        Some(DrawCommand::Arc { line_cap: LineCap::Butt, .. })
    ));

    ring.set_progress(1.0).unwrap();
    assert_eq!(ring.resolved_line_cap(), LineCap::Round);
}

#[test]
fn test_zero_progress_round_cap_leaves_no_stub() {
    let plain = widget_with(
        WidgetConfig::builder()
            .size(120)
            .guide_visible(false)
            .build(),
    );
    let mut round = widget_with(
        WidgetConfig::builder()
            .size(120)
            .guide_visible(false)
            .build(),
    );
    round.set_line_cap_style(LineCap::Round);
    assert_eq!(plain.surface().frame(), round.surface().frame());
    assert!(round.surface().frame().iter().all(|&b| b == 0));
}

#[test]
fn test_oversized_surface_rejected() {
    let mut host = host();
    let config = WidgetConfig::builder().size(u32::MAX).build();
    let err = CircularProgress::new(&mut host, "main", "huge", config).unwrap_err();
    assert!(err.is_illegal_argument());
    assert!(host.find_surface("huge").is_none());

    let mut ring = widget();
    ring.set_progress(55.0).unwrap();
    let before = ring.surface().frame().to_vec();
    assert!(ring.set_size(u32::MAX).unwrap_err().is_illegal_argument());
    assert!(ring.set_size(MAX_SIZE + 1).unwrap_err().is_illegal_argument());
    assert_eq!(ring.size(), 120);
    assert_eq!(ring.geometry().size, 120);
    assert_eq!(ring.surface().frame(), &before[..]);
}

#[test]
fn test_label_is_rasterised_at_centre() {
    let font = include_bytes!("fonts/DejaVuSans.ttf").to_vec();
    let ring = widget_with(
        WidgetConfig::builder()
            .size(200)
            .guide_visible(false)
            .font_data(font)
            .build(),
    );
    assert_eq!(ring.formatted_progress(), "00%");

    // with no guide and a zero sweep only the label carries ink
    let surface = ring.surface();
    let mut bounds = (usize::MAX, 0, usize::MAX, 0);
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            if surface.pixel(x, y).unwrap().a > 0 {
                bounds = (bounds.0.min(x), bounds.1.max(x), bounds.2.min(y), bounds.3.max(y));
            }
        }
    }
    let (min_x, max_x, min_y, max_y) = bounds;
    assert!(min_x < max_x && min_y < max_y);
    let half = ring.geometry().half_size;
    assert!(((min_x + max_x) as f64 / 2.0 - half).abs() <= 2.0);
    assert!(((min_y + max_y) as f64 / 2.0 - half).abs() <= 2.0);
}

#[test]
fn test_resize_keeps_progress() {
    let mut ring = widget();
    ring.set_float_mode(true);
    ring.set_progress(49.4).unwrap();
    let before = ring.get_progress();
    ring.set_size(250).unwrap();
    assert_eq!(ring.get_progress(), before);
    assert_eq!(ring.surface().frame().len(), 250 * 250 * 4);
}

#[test]
fn test_get_progress_ignores_percent_sign_and_floor() {
    let mut ring = widget();
    ring.set_progress(67.6).unwrap();
    assert_eq!(ring.formatted_progress(), "67%");
    assert_eq!(ring.get_progress(), "68");
    ring.set_float_mode(true);
    assert_eq!(ring.get_progress(), "67.6");
}

#[test]
fn test_same_value_setters_repaint_identically() {
    let mut ring = widget();
    ring.set_progress(63.0).unwrap();
    ring.set_line_cap_style(LineCap::Round);
    let before = ring.surface().frame().to_vec();

    ring.set_progress(63.0).unwrap();
    ring.set_size(120).unwrap();
    ring.set_line_cap_style(LineCap::Round);
    ring.set_float_mode(false);
    ring.set_small_guide(false);
    ring.set_percent_sign_visible(true);
    ring.set_counter_clockwise(true);
    ring.set_guide_visible(true);
    ring.set_diagnostics_mode(false);
    ring.set_font_color("rgba(0,0,0,1)").unwrap();
    ring.set_progress_color("rgba(0,99,177, 1)").unwrap();
    ring.set_guide_color("rgba(0,99,177, 0.5)").unwrap();

    assert_eq!(ring.surface().frame(), &before[..]);
}

#[test]
fn test_diagnostics_overlay_toggles() {
    let mut ring = widget_with(
        WidgetConfig::builder()
            .size(120)
            .guide_visible(false)
            .build(),
    );
    // centre pixel is inside the ring and untouched without the overlay
    assert_eq!(ring.surface().pixel(60, 60).unwrap().a, 0);

    ring.set_diagnostics_mode(true);
    assert!(ring.is_diagnostics_mode());
    assert!(ring.surface().pixel(60, 60).unwrap().a > 0);
    assert!(ring.surface().pixel(0, 30).unwrap().a > 0);

    ring.set_diagnostics_mode(false);
    assert_eq!(ring.surface().pixel(60, 60).unwrap().a, 0);
}

#[test]
fn test_sweep_direction_on_surface() {
    let mut ring = widget_with(
        WidgetConfig::builder()
            .size(200)
            .guide_visible(false)
            .build(),
    );
    ring.set_progress(25.0).unwrap();
    // counter-clockwise from the top lands on the left side
    assert!(ring.surface().pixel(33, 33).unwrap().a > 0);
    assert_eq!(ring.surface().pixel(166, 33).unwrap().a, 0);

    ring.set_counter_clockwise(false);
    assert!(ring.surface().pixel(166, 33).unwrap().a > 0);
    assert_eq!(ring.surface().pixel(33, 33).unwrap().a, 0);
}

proptest! {
    #[test]
    fn prop_end_angle_matches_formula(progress in 0.0f64..=100.0, ccw in any::<bool>()) {
        let angles = ProgressAngles::compute(progress, ccw);
        let offset = (FULL_ANGLE / 100.0) * progress;
        let expected = if ccw { START_ANGLE - offset } else { START_ANGLE + offset };
        prop_assert_eq!(angles.end, expected);
        // one ulp of slack from (2π / 100) * 100
        prop_assert!(angles.end >= START_ANGLE - FULL_ANGLE - 1e-12);
        prop_assert!(angles.end <= START_ANGLE + FULL_ANGLE + 1e-12);
    }

    #[test]
    fn prop_widget_angles_track_progress(progress in 0.0f64..=100.0, ccw in any::<bool>()) {
        let mut ring = widget();
        ring.set_counter_clockwise(ccw);
        ring.set_progress(progress).unwrap();
        prop_assert_eq!(*ring.angles(), ProgressAngles::compute(progress, ccw));
    }

    #[test]
    fn prop_rejected_progress_never_mutates(bad in prop_oneof![100.0001f64..1e6, -1e6f64..-0.0001]) {
        let mut ring = widget();
        ring.set_progress(12.0).unwrap();
        prop_assert!(ring.set_progress(bad).is_err());
        prop_assert_eq!(ring.progress(), 12.0);
    }
}
