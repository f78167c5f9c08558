use chart_annotate::core::{
    Annotation, LabelSize, PhotoAnnotation, PhotoCategory, PhotoKind, PlacementMode, Viewport,
};
use chart_annotate::extensions::{LabelStack, MarkerLayoutConfig, PhotoClusterer, layout_markers};
use chart_annotate::interaction::{HitTester, PointerEvent};
use chart_annotate::{AnnotationConfig, AnnotationEngine, AnnotationLayers};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn viewport() -> Viewport {
    Viewport::new(0.2, 1.0, 0, 600, 1920).with_virtual_width(2_000)
}

fn markers_10k() -> Vec<Annotation> {
    (0..10_000)
        .map(|i| {
            let mode = if i % 2 == 0 {
                PlacementMode::HorizontalAboveGraphCentered
            } else {
                PlacementMode::HorizontalBelowGraphCentered
            };
            Annotation::new(i, 0, i as f64, 200.0 + (i % 97) as f64)
                .with_placement(mode)
                .with_label_size(LabelSize::new(42, 14))
                .with_label("marker")
        })
        .collect()
}

fn photos_10k() -> PhotoCategory {
    let photos = (0..10_000)
        .map(|i| PhotoAnnotation::new(i, i as f64 * 0.9, Some(150.0)))
        .collect();
    PhotoCategory::new("tour", PhotoKind::Tour, photos)
}

fn bench_marker_layout_10k(c: &mut Criterion) {
    let markers = markers_10k();
    let config = MarkerLayoutConfig::default();
    let mut stack = LabelStack::new(3);

    c.bench_function("marker_layout_10k", |b| {
        b.iter(|| {
            stack.reset(0, 600);
            let _ = layout_markers(black_box(&markers), black_box(viewport()), config, &mut stack)
                .expect("layout should succeed");
        })
    });
}

fn bench_photo_clustering_10k(c: &mut Criterion) {
    let category = photos_10k();
    let clusterer = PhotoClusterer::default();

    c.bench_function("photo_clustering_10k", |b| {
        b.iter(|| {
            let _ = clusterer
                .cluster(black_box(&category), black_box(viewport()))
                .expect("clustering should succeed");
        })
    });
}

fn bench_engine_pass_and_hit_test(c: &mut Criterion) {
    let layers = AnnotationLayers::default()
        .with_markers(markers_10k())
        .with_photo_categories(vec![photos_10k()]);
    let mut engine = AnnotationEngine::new(AnnotationConfig::default()).expect("engine init");
    engine.layout(viewport(), &layers).expect("layout");
    let snapshot = engine.snapshot().clone();
    let mut tester = HitTester::new();
    let mut event_id = 0_u64;

    c.bench_function("engine_layout_pass_10k", |b| {
        b.iter(|| {
            let _ = engine
                .layout(black_box(viewport()), black_box(&layers))
                .expect("layout should succeed");
        })
    });

    c.bench_function("hit_test_uncached_10k", |b| {
        b.iter(|| {
            event_id += 1;
            let _ = tester.pick(black_box(PointerEvent::new(960, 300, event_id)), &snapshot);
        })
    });
}

criterion_group!(
    benches,
    bench_marker_layout_10k,
    bench_photo_clustering_10k,
    bench_engine_pass_and_hit_test
);
criterion_main!(benches);
