use tracing::trace;

use crate::core::{DevicePoint, DeviceRect};
use crate::extensions::LayoutSnapshot;

use super::{Hit, HitPart, HitResult, HoverEntity, PointerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitCacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CachedHit {
    event_id: u64,
    generation: u64,
    result: HitResult,
}

/// Resolves the annotation under the pointer, once per pointer event.
///
/// Several callbacks usually ask about the same mouse move; the one-entry
/// cache returns the identical result for a repeated `event_id` against the
/// same snapshot generation.
#[derive(Debug, Clone, Default)]
pub struct HitTester {
    cache: Option<CachedHit>,
    stats: HitCacheStats,
}

impl HitTester {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pick(&mut self, event: PointerEvent, snapshot: &LayoutSnapshot) -> HitResult {
        if let Some(cached) = self.cache.filter(|cached| {
            cached.event_id == event.event_id && cached.generation == snapshot.generation
        }) {
            self.stats.hits += 1;
            trace!(event_id = event.event_id, "hit test cache hit");
            return cached.result;
        }

        let result = hit_test(event.position(), snapshot);
        self.stats.misses += 1;
        trace!(
            event_id = event.event_id,
            x = event.x,
            y = event.y,
            hit = result.is_some(),
            "hit test resolved"
        );
        self.cache = Some(CachedHit {
            event_id: event.event_id,
            generation: snapshot.generation,
            result,
        });
        result
    }

    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    #[must_use]
    pub fn stats(&self) -> HitCacheStats {
        self.stats
    }
}

/// Uncached hit test in fixed priority order: photo clusters, then label
/// rects, then point rects, then segment titles. First match wins.
///
/// Containment is strict, so a pointer on a boundary pixel misses.
#[must_use]
pub fn hit_test(pointer: DevicePoint, snapshot: &LayoutSnapshot) -> HitResult {
    for (category, layer) in snapshot.photo_layers.iter().enumerate() {
        for (cluster, item) in layer.clusters.iter().enumerate() {
            if item.bounds.contains_strict(pointer) {
                return Some(Hit {
                    entity: HoverEntity::Cluster { category, cluster },
                    part: HitPart::ClusterBounds,
                    rect: item.bounds,
                });
            }
        }
    }

    let marker_labels = snapshot.markers.values().filter_map(|marker| {
        marker
            .label_hit_rect()
            .map(|rect| (HoverEntity::Marker(marker.id), rect))
    });
    let segment_labels = snapshot.segment_labels.values().filter_map(|segment| {
        segment
            .label_hit_rect()
            .map(|rect| (HoverEntity::SegmentLabel(segment.id), rect))
    });
    if let Some(hit) = first_containing(pointer, marker_labels.chain(segment_labels), HitPart::Label)
    {
        return Some(hit);
    }

    let marker_points = snapshot.markers.values().filter_map(|marker| {
        marker
            .point_hit_rect()
            .map(|rect| (HoverEntity::Marker(marker.id), rect))
    });
    let segment_points = snapshot
        .segment_labels
        .values()
        .map(|segment| (HoverEntity::SegmentLabel(segment.id), segment.point_hit_rect()));
    if let Some(hit) = first_containing(pointer, marker_points.chain(segment_points), HitPart::Point)
    {
        return Some(hit);
    }

    snapshot
        .titles
        .iter()
        .find(|title| title.is_hit(pointer))
        .map(|title| Hit {
            entity: HoverEntity::SegmentTitle(title.index),
            part: HitPart::Title,
            rect: title.rect(),
        })
}

fn first_containing(
    pointer: DevicePoint,
    mut candidates: impl Iterator<Item = (HoverEntity, DeviceRect)>,
    part: HitPart,
) -> HitResult {
    candidates
        .find(|(_, rect)| rect.contains_strict(pointer))
        .map(|(entity, rect)| Hit { entity, part, rect })
}

#[cfg(test)]
mod tests {
    use super::HitTester;
    use crate::core::{AnnotationId, DevicePoint, DeviceRect, PhotoKind, PlacementMode};
    use crate::extensions::{LayoutSnapshot, MarkerGeometry, PhotoCluster, PhotoClusterLayer};
    use crate::interaction::{HitPart, HoverEntity, PointerEvent};

    fn marker(id: u64, point: DevicePoint, label: Option<DeviceRect>) -> MarkerGeometry {
        MarkerGeometry {
            id: AnnotationId(id),
            placement_mode: PlacementMode::HorizontalAboveGraphCentered,
            device_point: point,
            point_rect: Some(DeviceRect::new(point.x - 2, point.y - 2, 4, 4)),
            label_rect: label,
            is_vertical: false,
            hover_padding: 2,
            is_hidden: false,
            use_default_color: true,
            graph_top: 0,
            graph_bottom: 100,
        }
    }

    #[test]
    fn repeated_event_id_is_served_from_cache() {
        let mut snapshot = LayoutSnapshot::default();
        snapshot.markers.insert(
            AnnotationId(1),
            marker(1, DevicePoint::new(50, 50), Some(DeviceRect::new(40, 30, 20, 10))),
        );
        let mut tester = HitTester::new();

        let first = tester.pick(PointerEvent::new(50, 35, 7), &snapshot);
        let second = tester.pick(PointerEvent::new(50, 35, 7), &snapshot);

        assert_eq!(first, second);
        assert_eq!(tester.stats().hits, 1);
        assert_eq!(tester.stats().misses, 1);
    }

    #[test]
    fn new_snapshot_generation_bypasses_cache() {
        let mut snapshot = LayoutSnapshot::default();
        let mut tester = HitTester::new();
        assert!(tester.pick(PointerEvent::new(50, 50, 1), &snapshot).is_none());

        snapshot.generation += 1;
        snapshot
            .markers
            .insert(AnnotationId(3), marker(3, DevicePoint::new(50, 50), None));
        let hit = tester.pick(PointerEvent::new(50, 50, 1), &snapshot).expect("hit");

        assert_eq!(hit.entity, HoverEntity::Marker(AnnotationId(3)));
        assert_eq!(hit.part, HitPart::Point);
    }

    #[test]
    fn cluster_wins_over_overlapping_label() {
        let mut snapshot = LayoutSnapshot::default();
        snapshot.markers.insert(
            AnnotationId(1),
            marker(1, DevicePoint::new(50, 50), Some(DeviceRect::new(0, 0, 100, 40))),
        );
        snapshot.photo_layers.push(PhotoClusterLayer {
            name: "tour".to_owned(),
            kind: PhotoKind::Tour,
            clusters: vec![PhotoCluster {
                kind: PhotoKind::Tour,
                grid_start: 1,
                grid_end: 40,
                member_indices: vec![0],
                center_point: None,
                bounds: DeviceRect::new(1, 0, 40, 20),
            }],
        });

        let hit = super::hit_test(DevicePoint::new(10, 10), &snapshot).expect("hit");
        assert_eq!(
            hit.entity,
            HoverEntity::Cluster {
                category: 0,
                cluster: 0
            }
        );
    }
}
