use serde::{Deserialize, Serialize};

use crate::core::{DeviceOffset, DevicePoint, DeviceRect};

/// Where a persistent tooltip is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PinLocation {
    /// Not pinned: the tooltip sits next to the hovered annotation.
    #[default]
    Disabled,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Follows the hit point horizontally, above or below it.
    FollowPointerX,
    /// Centered on the chart once, then moved only by dragging.
    FollowScreen,
}

impl PinLocation {
    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight
        )
    }
}

/// Side of the hovered rect used while the pin location is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TooltipAnchor {
    Left,
    Right,
    Above,
    #[default]
    Below,
    ChartTop,
    ChartBottom,
}

/// Content layout of the tooltip; consumed by the host only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TooltipOrientation {
    Horizontal,
    #[default]
    Vertical,
}

/// Tooltip position state persisted across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipPlacement {
    pin_location: PinLocation,
    drag_offset: DeviceOffset,
    screen_position: Option<DevicePoint>,
    screen_anchor: Option<DevicePoint>,
    cover_correction: Option<DeviceOffset>,
    follow_above: bool,
}

impl Default for TooltipPlacement {
    fn default() -> Self {
        Self::new(PinLocation::Disabled)
    }
}

impl TooltipPlacement {
    #[must_use]
    pub fn new(pin_location: PinLocation) -> Self {
        Self {
            pin_location,
            drag_offset: DeviceOffset::ZERO,
            screen_position: None,
            screen_anchor: None,
            cover_correction: None,
            follow_above: true,
        }
    }

    #[must_use]
    pub fn pin_location(&self) -> PinLocation {
        self.pin_location
    }

    /// Switches the anchor mode and forgets drag and cover corrections.
    pub fn set_pin_location(&mut self, pin_location: PinLocation) {
        *self = Self::new(pin_location);
    }

    #[must_use]
    pub fn drag_offset(&self) -> DeviceOffset {
        self.drag_offset
    }

    pub fn drag_by(&mut self, dx: i32, dy: i32) {
        self.drag_offset = self.drag_offset + DeviceOffset::new(dx, dy);
    }

    #[must_use]
    pub fn screen_position(&self) -> Option<DevicePoint> {
        self.screen_position
    }

    #[must_use]
    pub fn cover_correction(&self) -> Option<DeviceOffset> {
        self.cover_correction
    }

    #[must_use]
    pub fn is_above_hit_point(&self) -> bool {
        self.follow_above
    }
}

/// Inputs of one tooltip positioning request.
///
/// `hit_rect`, `hit_point` and the graph band are in chart device pixels;
/// `owner_bounds` is the chart's rectangle in screen pixels and `monitors`
/// the available display areas in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipRequest<'a> {
    pub hit_rect: DeviceRect,
    pub hit_point: DevicePoint,
    pub is_vertical_label: bool,
    pub tooltip_width: i32,
    pub tooltip_height: i32,
    pub owner_bounds: DeviceRect,
    pub graph_top: i32,
    pub graph_bottom: i32,
    pub monitors: &'a [DeviceRect],
    pub anchor: TooltipAnchor,
    pub margin: i32,
}

impl<'a> TooltipRequest<'a> {
    #[must_use]
    pub fn new(
        hit_rect: DeviceRect,
        tooltip_width: i32,
        tooltip_height: i32,
        owner_bounds: DeviceRect,
        monitors: &'a [DeviceRect],
    ) -> Self {
        Self {
            hit_rect,
            hit_point: hit_rect.center(),
            is_vertical_label: false,
            tooltip_width,
            tooltip_height,
            owner_bounds,
            graph_top: 0,
            graph_bottom: owner_bounds.height,
            monitors,
            anchor: TooltipAnchor::default(),
            margin: 3,
        }
    }

    #[must_use]
    pub fn with_hit_point(mut self, hit_point: DevicePoint) -> Self {
        self.hit_point = hit_point;
        self
    }

    #[must_use]
    pub fn with_graph_band(mut self, graph_top: i32, graph_bottom: i32) -> Self {
        self.graph_top = graph_top;
        self.graph_bottom = graph_bottom;
        self
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: TooltipAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    #[must_use]
    pub fn with_vertical_label(mut self, is_vertical_label: bool) -> Self {
        self.is_vertical_label = is_vertical_label;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin;
        self
    }

    fn to_screen(&self, point: DevicePoint) -> DevicePoint {
        DevicePoint::new(point.x + self.owner_bounds.x, point.y + self.owner_bounds.y)
    }

    fn tooltip_rect(&self, origin: DevicePoint) -> DeviceRect {
        DeviceRect::new(origin.x, origin.y, self.tooltip_width, self.tooltip_height)
    }
}

/// Computes on-screen tooltip locations.
#[derive(Debug, Clone, Copy, Default)]
pub struct TooltipPositioner;

impl TooltipPositioner {
    /// Returns the tooltip's top-left screen position and records it in
    /// `placement`. The result always lies inside one of the monitors when
    /// the tooltip fits on it.
    pub fn position(request: &TooltipRequest<'_>, placement: &mut TooltipPlacement) -> DevicePoint {
        let unclamped = match placement.pin_location {
            PinLocation::Disabled => anchored_position(request),
            PinLocation::FollowScreen => {
                let owner = request.owner_bounds;
                let anchor = *placement.screen_anchor.get_or_insert_with(|| {
                    DevicePoint::new(
                        owner.x + owner.width / 2 - request.tooltip_width / 2,
                        owner.y + owner.height / 2 - request.tooltip_height / 2,
                    )
                });
                anchor.offset_by(placement.drag_offset)
            }
            PinLocation::FollowPointerX => follow_pointer_position(request, placement),
            corner => corner_position(request, placement, corner),
        };

        let position = Self::clamp_to_monitors(
            request.tooltip_rect(unclamped),
            request.monitors,
        )
        .top_left();
        placement.screen_position = Some(position);
        position
    }

    /// Moves `rect` into the monitor holding its top-left corner, or the
    /// nearest monitor. Oversized rects are aligned to the monitor's top-left.
    #[must_use]
    pub fn clamp_to_monitors(rect: DeviceRect, monitors: &[DeviceRect]) -> DeviceRect {
        let origin = rect.top_left();
        let Some(monitor) = monitors
            .iter()
            .find(|monitor| monitor.contains_point(origin))
            .or_else(|| {
                monitors
                    .iter()
                    .min_by_key(|monitor| squared_distance(**monitor, origin))
            })
        else {
            return rect;
        };

        let x = if rect.width > monitor.width {
            monitor.x
        } else {
            rect.x.clamp(monitor.x, monitor.right() - rect.width)
        };
        let y = if rect.height > monitor.height {
            monitor.y
        } else {
            rect.y.clamp(monitor.y, monitor.bottom() - rect.height)
        };
        rect.with_origin(DevicePoint::new(x, y))
    }
}

/// Tooltip next to the hovered rect, kept near the graph band.
fn anchored_position(request: &TooltipRequest<'_>) -> DevicePoint {
    let hovered = request.hit_rect;
    let (width, height) = (request.tooltip_width, request.tooltip_height);
    let hovered_y = hovered.y.max(request.graph_top);
    let centered_x = hovered.x + hovered.width / 2 - width / 2;
    let side_y = if request.is_vertical_label {
        hovered_y
    } else {
        hovered_y + hovered.height / 2 - height / 2
    };

    let (mut x, mut y) = match request.anchor {
        TooltipAnchor::Left => (hovered.x - width - 1, side_y),
        TooltipAnchor::Right => (hovered.right() + 1, side_y),
        TooltipAnchor::Above => (centered_x, hovered_y - height - 1),
        TooltipAnchor::ChartTop => (centered_x, request.graph_top - height),
        TooltipAnchor::ChartBottom => (centered_x, request.graph_bottom),
        TooltipAnchor::Below => (centered_x, hovered_y + hovered.height + 1),
    };

    let graph_width = request.owner_bounds.width;
    if x + width < 0 {
        x = -width - 1;
    } else if x > graph_width {
        x = graph_width;
    }
    if y + height < request.graph_top {
        y = request.graph_top - height;
    } else if y > request.graph_bottom {
        y = request.graph_bottom;
    }

    request.to_screen(DevicePoint::new(x, y))
}

fn corner_position(
    request: &TooltipRequest<'_>,
    placement: &mut TooltipPlacement,
    corner: PinLocation,
) -> DevicePoint {
    let owner = request.owner_bounds;
    let margin = request.margin;
    let (width, height) = (request.tooltip_width, request.tooltip_height);
    let left = owner.x + margin;
    let right = owner.right() - width - margin;
    let top = owner.y + margin;
    let bottom = owner.bottom() - height - margin;

    let corner_point = match corner {
        PinLocation::TopRight => DevicePoint::new(right, top),
        PinLocation::BottomLeft => DevicePoint::new(left, bottom),
        PinLocation::BottomRight => DevicePoint::new(right, bottom),
        _ => DevicePoint::new(left, top),
    };
    let base = corner_point.offset_by(placement.drag_offset);
    let hit_point = request.to_screen(request.hit_point);
    let covers = |origin: DevicePoint| {
        request
            .tooltip_rect(origin)
            .expand(margin)
            .contains_point(hit_point)
    };

    if !covers(base) {
        placement.cover_correction = None;
        return base;
    }
    if let Some(correction) = placement.cover_correction {
        let corrected = base.offset_by(correction);
        if !covers(corrected) {
            return corrected;
        }
    }

    let is_top = matches!(corner, PinLocation::TopLeft | PinLocation::TopRight);
    let is_left = matches!(corner, PinLocation::TopLeft | PinLocation::BottomLeft);
    let dy = if is_top {
        hit_point.y + margin + 1 - base.y
    } else {
        hit_point.y - margin - 1 - height - base.y
    };
    let dx = if is_left {
        hit_point.x + margin + 1 - base.x
    } else {
        hit_point.x - margin - 1 - width - base.x
    };
    let correction = if dy.abs() <= dx.abs() {
        DeviceOffset::new(0, dy)
    } else {
        DeviceOffset::new(dx, 0)
    };
    placement.cover_correction = Some(correction);
    base.offset_by(correction)
}

/// Keeps the last side (above/below the hit point) until it runs out of room.
fn follow_pointer_position(
    request: &TooltipRequest<'_>,
    placement: &mut TooltipPlacement,
) -> DevicePoint {
    let hit_rect = request.hit_rect.translate(request.owner_bounds.x, request.owner_bounds.y);
    let hit_point = request.to_screen(request.hit_point);
    let margin = request.margin;
    let height = request.tooltip_height;
    let drag = placement.drag_offset;

    let above_y = hit_rect.y - height - margin + drag.dy;
    let below_y = hit_rect.bottom() + margin + drag.dy;
    let area = monitor_for(hit_point, request.monitors).unwrap_or(request.owner_bounds);
    let fits_above = above_y >= area.y;
    let fits_below = below_y + height <= area.bottom();

    if placement.follow_above && !fits_above && fits_below {
        placement.follow_above = false;
    } else if !placement.follow_above && !fits_below && fits_above {
        placement.follow_above = true;
    }

    let x = hit_point.x - request.tooltip_width / 2 + drag.dx;
    let y = if placement.follow_above {
        above_y
    } else {
        below_y
    };
    DevicePoint::new(x, y)
}

fn monitor_for(point: DevicePoint, monitors: &[DeviceRect]) -> Option<DeviceRect> {
    monitors
        .iter()
        .copied()
        .find(|monitor| monitor.contains_point(point))
        .or_else(|| {
            monitors
                .iter()
                .copied()
                .min_by_key(|monitor| squared_distance(*monitor, point))
        })
}

fn squared_distance(rect: DeviceRect, point: DevicePoint) -> i64 {
    let dx = if point.x < rect.x {
        i64::from(rect.x - point.x)
    } else if point.x >= rect.right() {
        i64::from(point.x - rect.right() + 1)
    } else {
        0
    };
    let dy = if point.y < rect.y {
        i64::from(rect.y - point.y)
    } else if point.y >= rect.bottom() {
        i64::from(point.y - rect.bottom() + 1)
    } else {
        0
    };
    dx * dx + dy * dy
}
