use approx::assert_relative_eq;
use chart_annotate::api::LayerKind;
use chart_annotate::core::{
    Annotation, LabelSize, PhotoAnnotation, PhotoCategory, PhotoKind, SegmentAnnotation,
    TitleSegment, Viewport, to_device,
};
use chart_annotate::{AnnotationConfig, AnnotationEngine, AnnotationError, AnnotationLayers};

fn viewport() -> Viewport {
    Viewport::new(1.0, 1.0, 0, 100, 500)
}

fn layers() -> AnnotationLayers {
    AnnotationLayers::default()
        .with_markers(vec![
            Annotation::new(1, 0, 100.0, 50.0)
                .with_label("start")
                .with_label_size(LabelSize::new(30, 10)),
            Annotation::new(2, 0, 110.0, 50.0)
                .with_label("split")
                .with_label_size(LabelSize::new(30, 10)),
        ])
        .with_segments(vec![
            SegmentAnnotation::new(10, 0, 200.0, 40.0, false).with_label("-3 m"),
        ])
        .with_photo_categories(vec![
            PhotoCategory::new(
                "tour",
                PhotoKind::Tour,
                vec![
                    PhotoAnnotation::new(20, 10.0, Some(30.0)),
                    PhotoAnnotation::new(21, 70.0, None),
                ],
            ),
            PhotoCategory::new(
                "linked",
                PhotoKind::Link,
                vec![PhotoAnnotation::new(30, 15.0, Some(10.0))],
            ),
        ])
        .with_titles(vec![TitleSegment::new(0, 0.0, 250.0, 14)])
}

#[test]
fn layout_pass_fills_every_layer() {
    let mut engine = AnnotationEngine::new(AnnotationConfig::default()).expect("engine init");
    let snapshot = engine.layout(viewport(), &layers()).expect("layout");

    assert_eq!(snapshot.generation, 1);
    assert_eq!(snapshot.stats.markers, 2);
    assert_eq!(snapshot.stats.segment_labels, 1);
    assert_eq!(snapshot.stats.labels_placed, 3);
    assert_eq!(snapshot.stats.labels_suppressed, 0);
    assert_eq!(snapshot.photo_layers.len(), 2);
    assert_eq!(snapshot.stats.clusters, 3);
    assert_eq!(snapshot.photo_layers[1].clusters[0].bounds.y, 20);
    assert_eq!(snapshot.titles.len(), 1);

    let first = snapshot.markers[0].label_rect.expect("first label");
    let second = snapshot.markers[1].label_rect.expect("second label");
    assert!(!first.overlaps_vertically(second));
}

#[test]
fn generation_increments_per_pass() {
    let mut engine = AnnotationEngine::new(AnnotationConfig::default()).expect("engine init");
    engine.layout(viewport(), &layers()).expect("layout");
    engine.layout(viewport(), &layers()).expect("layout");
    assert_eq!(engine.generation(), 2);
    assert_eq!(engine.snapshot().generation, 2);
}

#[test]
fn layout_is_deterministic() {
    let mut engine = AnnotationEngine::new(AnnotationConfig::default()).expect("engine init");
    let first = engine.layout(viewport(), &layers()).expect("layout").clone();
    let second = engine.layout(viewport(), &layers()).expect("layout").clone();

    assert_eq!(first.markers, second.markers);
    assert_eq!(first.segment_labels, second.segment_labels);
    assert_eq!(first.photo_layers, second.photo_layers);
    assert_eq!(first.titles, second.titles);
}

#[test]
fn degenerate_viewport_yields_empty_snapshot() {
    let mut engine = AnnotationEngine::new(AnnotationConfig::default()).expect("engine init");
    let snapshot = engine
        .layout(Viewport::new(1.0, 1.0, 0, 0, 0), &layers())
        .expect("layout");
    assert!(snapshot.is_empty());
}

#[test]
fn non_finite_viewport_is_rejected() {
    let mut engine = AnnotationEngine::new(AnnotationConfig::default()).expect("engine init");
    let viewport = viewport().with_scroll_offset_x(f64::INFINITY);

    let error = engine.layout(viewport, &layers()).expect_err("invalid viewport");
    assert!(matches!(
        error,
        AnnotationError::InvalidViewport {
            field: "scroll_offset_x",
            ..
        }
    ));
}

#[test]
fn hidden_layer_produces_no_geometry() {
    let mut engine = AnnotationEngine::new(AnnotationConfig::default()).expect("engine init");
    let photos = engine
        .layers()
        .layer_for(LayerKind::Photos)
        .expect("photo layer");
    engine
        .layers_mut()
        .set_visible(photos, false)
        .expect("known layer");

    let snapshot = engine.layout(viewport(), &layers()).expect("layout");
    assert!(snapshot.photo_layers.is_empty());
    assert_eq!(snapshot.stats.markers, 2);
}

#[test]
fn set_config_rebinds_stack_capacity() {
    let mut engine = AnnotationEngine::new(AnnotationConfig::default()).expect("engine init");
    engine
        .set_config(AnnotationConfig::default().with_stacked_label_capacity(0))
        .expect("valid config");

    let snapshot = engine.layout(viewport(), &layers()).expect("layout");
    let first = snapshot.markers[0].label_rect.expect("first label");
    let second = snapshot.markers[1].label_rect.expect("second label");
    assert_eq!(first.y, second.y);
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = AnnotationConfig::default().with_cluster_base_width_px(0);
    assert!(AnnotationEngine::new(config).is_err());
}

#[test]
fn mapping_follows_scale_scroll_and_baseline() {
    let viewport = Viewport::new(2.5, 0.5, 10, 210, 800)
        .with_scroll_offset_x(30.0)
        .with_value_bottom(100.0);

    let point = to_device(40.0, 300.0, viewport);
    assert_eq!(point.x, 70);
    assert_eq!(point.y, 110);
    assert_relative_eq!(viewport.zoom_ratio(), 1.0);
}
