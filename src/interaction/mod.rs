use serde::{Deserialize, Serialize};

use crate::core::{AnnotationId, DevicePoint, DeviceRect};

pub mod hit_test;
pub mod tooltip;
pub mod tooltip_controller;

pub use hit_test::{HitCacheStats, HitTester, hit_test};
pub use tooltip::{
    PinLocation, TooltipAnchor, TooltipOrientation, TooltipPlacement, TooltipPositioner,
    TooltipRequest,
};
pub use tooltip_controller::{TooltipController, TooltipTransition};

/// Anything the pointer can hover on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoverEntity {
    Marker(AnnotationId),
    /// Cluster `cluster` of photo category `category`, both in snapshot order.
    Cluster { category: usize, cluster: usize },
    SegmentLabel(AnnotationId),
    SegmentTitle(usize),
}

/// Which painted part of the entity was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitPart {
    ClusterBounds,
    Label,
    Point,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub entity: HoverEntity,
    pub part: HitPart,
    /// The hit-tested rectangle, hover padding included.
    pub rect: DeviceRect,
}

pub type HitResult = Option<Hit>;

/// One physical pointer event. `event_id` must differ between events (an
/// event timestamp works) and repeat for queries about the same event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
    pub event_id: u64,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(x: i32, y: i32, event_id: u64) -> Self {
        Self { x, y, event_id }
    }

    #[must_use]
    pub fn position(self) -> DevicePoint {
        DevicePoint::new(self.x, self.y)
    }
}

/// Public hover state exposed to host applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HoverState {
    hovered: Option<HoverEntity>,
    hovered_rect: Option<DeviceRect>,
    event_id: Option<u64>,
}

impl HoverState {
    #[must_use]
    pub fn hovered(self) -> Option<HoverEntity> {
        self.hovered
    }

    #[must_use]
    pub fn hovered_rect(self) -> Option<DeviceRect> {
        self.hovered_rect
    }

    #[must_use]
    pub fn event_id(self) -> Option<u64> {
        self.event_id
    }

    #[must_use]
    pub fn is_hovering(self) -> bool {
        self.hovered.is_some()
    }

    /// Records the outcome of a pointer move; returns `true` when the hovered
    /// entity changed and the overlay needs a redraw.
    pub fn on_pointer_move(&mut self, event: PointerEvent, result: HitResult) -> bool {
        let previous = self.hovered;
        self.event_id = Some(event.event_id);
        self.hovered = result.map(|hit| hit.entity);
        self.hovered_rect = result.map(|hit| hit.rect);
        previous != self.hovered
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
