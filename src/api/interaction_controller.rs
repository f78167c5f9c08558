use tracing::trace;

use crate::core::{DevicePoint, DeviceRect};
use crate::extensions::LayoutSnapshot;
use crate::interaction::{
    HitCacheStats, HitResult, HoverEntity, HoverState, PinLocation, PointerEvent,
    TooltipController, TooltipRequest, TooltipTransition,
};

use super::{AnnotationEngine, LayerKind};

/// Chart-space geometry a tooltip is positioned against.
struct TooltipTarget {
    hovered_rect: DeviceRect,
    hit_point: DevicePoint,
    is_vertical_label: bool,
}

impl AnnotationEngine {
    /// Resolves the entity under the pointer against the current snapshot.
    ///
    /// Repeated calls with the same `event_id` are served from the hit cache.
    /// Layers whose hover highlight changed are asked to redraw.
    pub fn pointer_move(&mut self, event: PointerEvent) -> HitResult {
        let result = self.hit_tester.pick(event, &self.snapshot);
        let previous = self.hover.hovered();
        if self.hover.on_pointer_move(event, result) {
            trace!(?previous, hovered = ?self.hover.hovered(), "hover changed");
            self.redraw_entities(previous, self.hover.hovered());
        }
        result
    }

    /// Pointer left the chart.
    pub fn pointer_exit(&mut self) {
        let previous = self.hover.hovered();
        self.hover.clear();
        self.redraw_entities(previous, None);
    }

    /// Drops all geometry after a resize or zoom; the next
    /// [`AnnotationEngine::layout`] call rebuilds it.
    pub fn invalidate_geometry(&mut self) {
        self.hover.clear();
        self.hit_tester.invalidate();
        self.snapshot = LayoutSnapshot {
            generation: self.generation,
            ..LayoutSnapshot::default()
        };
    }

    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        self.hover
    }

    #[must_use]
    pub fn hit_cache_stats(&self) -> HitCacheStats {
        self.hit_tester.stats()
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipController {
        &self.tooltip
    }

    /// Opens the tooltip of `entity`; any other open tooltip closes first.
    pub fn open_tooltip_for(&mut self, entity: HoverEntity) -> TooltipTransition {
        self.tooltip.open_for(entity)
    }

    pub fn close_tooltip(&mut self) -> Option<HoverEntity> {
        self.tooltip.close()
    }

    pub fn drag_tooltip(&mut self, dx: i32, dy: i32) {
        self.tooltip.drag_by(dx, dy);
    }

    pub fn set_tooltip_pin_location(&mut self, pin_location: PinLocation) {
        self.config.tooltip_pin_location = pin_location;
        self.tooltip.set_pin_location(pin_location);
    }

    /// Screen position of the open tooltip.
    ///
    /// `owner_bounds` is the chart's rectangle in screen pixels. Returns
    /// `None` when no tooltip is open or its entity has no geometry in the
    /// current snapshot.
    pub fn tooltip_position(
        &mut self,
        owner_bounds: DeviceRect,
        tooltip_width: i32,
        tooltip_height: i32,
        monitors: &[DeviceRect],
    ) -> Option<DevicePoint> {
        let entity = self.tooltip.open_entity()?;
        let target = tooltip_target(&self.snapshot, entity)?;
        let (graph_top, graph_bottom) = self
            .snapshot
            .viewport
            .map_or((0, owner_bounds.height), |viewport| {
                (viewport.graph_top, viewport.graph_bottom)
            });

        let request = TooltipRequest::new(
            target.hovered_rect,
            tooltip_width,
            tooltip_height,
            owner_bounds,
            monitors,
        )
        .with_hit_point(target.hit_point)
        .with_vertical_label(target.is_vertical_label)
        .with_graph_band(graph_top, graph_bottom)
        .with_anchor(self.config.tooltip_anchor)
        .with_margin(self.config.tooltip_margin_px);
        self.tooltip.position(&request)
    }

    fn redraw_entities(&self, previous: Option<HoverEntity>, current: Option<HoverEntity>) {
        let previous = previous.map(LayerKind::of_entity);
        let current = current.map(LayerKind::of_entity);
        if let Some(kind) = previous {
            self.layers.request_redraw_kind(kind);
        }
        if let Some(kind) = current.filter(|kind| Some(*kind) != previous) {
            self.layers.request_redraw_kind(kind);
        }
    }
}

fn tooltip_target(snapshot: &LayoutSnapshot, entity: HoverEntity) -> Option<TooltipTarget> {
    match entity {
        HoverEntity::Marker(id) => snapshot.marker(id).map(|marker| TooltipTarget {
            hovered_rect: marker.hovered_rect(),
            hit_point: marker.device_point,
            is_vertical_label: marker.is_vertical,
        }),
        HoverEntity::SegmentLabel(id) => snapshot.segment_label(id).map(|segment| {
            let point = segment.point_hit_rect();
            TooltipTarget {
                hovered_rect: segment
                    .label_hit_rect()
                    .map_or(point, |label| label.union(point)),
                hit_point: segment.device_point,
                is_vertical_label: false,
            }
        }),
        HoverEntity::Cluster { category, cluster } => {
            snapshot.cluster(category, cluster).map(|cluster| TooltipTarget {
                hovered_rect: cluster.bounds,
                hit_point: cluster.bounds.center(),
                is_vertical_label: false,
            })
        }
        HoverEntity::SegmentTitle(index) => snapshot.title(index).map(|title| {
            let rect = title.rect();
            TooltipTarget {
                hovered_rect: rect,
                hit_point: rect.center(),
                is_vertical_label: false,
            }
        }),
    }
}
