use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chart_annotate::core::{
    Annotation, AnnotationId, LabelSize, PhotoAnnotation, PhotoCategory, PhotoKind,
    SegmentAnnotation, TitleSegment, Viewport,
};
use chart_annotate::interaction::{HitPart, HoverEntity, PointerEvent};
use chart_annotate::{AnnotationConfig, AnnotationEngine, AnnotationLayers};

fn viewport() -> Viewport {
    Viewport::new(1.0, 1.0, 0, 100, 500)
}

fn marker(id: u64, x: f64, y: f64) -> Annotation {
    Annotation::new(id, 0, x, y)
        .with_label("m")
        .with_label_size(LabelSize::new(20, 10))
}

fn engine_with(layers: &AnnotationLayers) -> AnnotationEngine {
    let mut engine = AnnotationEngine::new(AnnotationConfig::default()).expect("engine init");
    engine.layout(viewport(), layers).expect("layout");
    engine
}

#[test]
fn padded_label_and_point_rects_are_hit() {
    let layers = AnnotationLayers::default().with_markers(vec![marker(1, 50.0, 20.0)]);
    let mut engine = engine_with(&layers);

    let label = engine
        .pointer_move(PointerEvent::new(50, 65, 1))
        .expect("label hit");
    assert_eq!(label.part, HitPart::Label);

    let point = engine
        .pointer_move(PointerEvent::new(50, 84, 2))
        .expect("point hit");
    assert_eq!(point.part, HitPart::Point);
    assert_eq!(point.entity, HoverEntity::Marker(AnnotationId(1)));
}

#[test]
fn pointer_on_boundary_pixel_misses() {
    let layers = AnnotationLayers::default().with_markers(vec![marker(1, 50.0, 20.0)]);
    let mut engine = engine_with(&layers);

    assert!(engine.pointer_move(PointerEvent::new(36, 70, 1)).is_none());
    assert!(engine.pointer_move(PointerEvent::new(37, 70, 2)).is_some());
}

#[test]
fn photo_cluster_has_priority_over_marker_label() {
    let layers = AnnotationLayers::default()
        .with_markers(vec![marker(1, 50.0, 95.0)])
        .with_photo_categories(vec![PhotoCategory::new(
            "tour",
            PhotoKind::Tour,
            vec![PhotoAnnotation::new(9, 50.0, Some(40.0))],
        )]);
    let mut engine = engine_with(&layers);

    let hit = engine
        .pointer_move(PointerEvent::new(50, 5, 1))
        .expect("cluster hit");
    assert_eq!(
        hit.entity,
        HoverEntity::Cluster {
            category: 0,
            cluster: 0
        }
    );
    assert_eq!(hit.part, HitPart::ClusterBounds);
}

#[test]
fn segment_labels_and_titles_are_hit_after_markers() {
    let layers = AnnotationLayers::default()
        .with_segments(vec![
            SegmentAnnotation::new(4, 0, 200.0, 50.0, true)
                .with_label("+5")
                .with_label_size(LabelSize::new(20, 10)),
        ])
        .with_titles(vec![TitleSegment::new(3, 300.0, 400.0, 16)]);
    let mut engine = engine_with(&layers);

    let segment = engine
        .pointer_move(PointerEvent::new(200, 42, 1))
        .expect("segment label hit");
    assert_eq!(segment.entity, HoverEntity::SegmentLabel(AnnotationId(4)));
    assert_eq!(segment.part, HitPart::Label);

    let title = engine
        .pointer_move(PointerEvent::new(350, 8, 2))
        .expect("title hit");
    assert_eq!(title.entity, HoverEntity::SegmentTitle(3));
}

#[test]
fn repeated_event_is_cached_until_next_layout() {
    let layers = AnnotationLayers::default().with_markers(vec![marker(1, 50.0, 20.0)]);
    let mut engine = engine_with(&layers);

    let first = engine.pointer_move(PointerEvent::new(50, 65, 42));
    let second = engine.pointer_move(PointerEvent::new(50, 65, 42));
    assert_eq!(first, second);
    assert_eq!(engine.hit_cache_stats().hits, 1);

    engine.layout(viewport(), &layers).expect("layout");
    let third = engine.pointer_move(PointerEvent::new(50, 65, 42));
    assert_eq!(third, first);
    assert_eq!(engine.hit_cache_stats().misses, 2);
}

#[test]
fn hover_changes_request_layer_redraws() {
    let redraws = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&redraws);
    let mut engine = AnnotationEngine::with_redraw_callback(
        AnnotationConfig::default(),
        Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    )
    .expect("engine init");
    let layers = AnnotationLayers::default().with_markers(vec![marker(1, 50.0, 20.0)]);
    engine.layout(viewport(), &layers).expect("layout");

    engine.pointer_move(PointerEvent::new(50, 65, 1));
    engine.pointer_move(PointerEvent::new(51, 66, 2));
    assert_eq!(redraws.load(Ordering::SeqCst), 1);
    assert!(engine.hover_state().is_hovering());

    engine.pointer_exit();
    assert_eq!(redraws.load(Ordering::SeqCst), 2);
    assert!(!engine.hover_state().is_hovering());
}

#[test]
fn invalidated_geometry_hits_nothing() {
    let layers = AnnotationLayers::default().with_markers(vec![marker(1, 50.0, 20.0)]);
    let mut engine = engine_with(&layers);
    engine.invalidate_geometry();

    assert!(engine.snapshot().is_empty());
    assert!(engine.pointer_move(PointerEvent::new(50, 65, 1)).is_none());
}
