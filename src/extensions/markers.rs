use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{
    Annotation, AnnotationId, CoordinateMapper, DevicePoint, DeviceRect, LabelSize, PlacementMode,
    Viewport,
};
use crate::error::{AnnotationError, AnnotationResult};

use super::label_stack::LabelStack;

/// Which parts of a marker are produced (and therefore painted and hit-tested).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarkerDisplay {
    Label,
    Point,
    #[default]
    Both,
}

impl MarkerDisplay {
    #[must_use]
    pub fn shows_label(self) -> bool {
        matches!(self, Self::Label | Self::Both)
    }

    #[must_use]
    pub fn shows_point(self) -> bool {
        matches!(self, Self::Point | Self::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerLayoutConfig {
    pub display: MarkerDisplay,
    pub show_hidden: bool,
    pub use_default_color: bool,
    pub point_size_px: i32,
    pub label_offset_px: i32,
    pub hover_padding_px: i32,
    pub label_char_width_px: f64,
    pub label_height_px: i32,
}

impl Default for MarkerLayoutConfig {
    fn default() -> Self {
        Self {
            display: MarkerDisplay::Both,
            show_hidden: false,
            use_default_color: false,
            point_size_px: 4,
            label_offset_px: 2,
            hover_padding_px: 4,
            label_char_width_px: 7.0,
            label_height_px: 14,
        }
    }
}

impl MarkerLayoutConfig {
    pub fn validate(self) -> AnnotationResult<Self> {
        for (value, name) in [
            (self.point_size_px, "point_size_px"),
            (self.label_offset_px, "label_offset_px"),
            (self.hover_padding_px, "hover_padding_px"),
            (self.label_height_px, "label_height_px"),
        ] {
            if value < 0 {
                return Err(AnnotationError::InvalidConfig(format!(
                    "marker config `{name}` must be >= 0"
                )));
            }
        }
        if !self.label_char_width_px.is_finite() || self.label_char_width_px < 0.0 {
            return Err(AnnotationError::InvalidConfig(
                "marker config `label_char_width_px` must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Painted geometry of one marker for one draw pass.
///
/// Valid until the next pass replaces the snapshot holding it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerGeometry {
    pub id: AnnotationId,
    pub placement_mode: PlacementMode,
    pub device_point: DevicePoint,
    pub point_rect: Option<DeviceRect>,
    /// `None` when the marker has no label, labels are not displayed, or the
    /// label found no free slot.
    pub label_rect: Option<DeviceRect>,
    pub is_vertical: bool,
    pub hover_padding: i32,
    pub is_hidden: bool,
    pub use_default_color: bool,
    pub graph_top: i32,
    pub graph_bottom: i32,
}

impl MarkerGeometry {
    #[must_use]
    pub fn label_hit_rect(&self) -> Option<DeviceRect> {
        self.label_rect.map(|rect| rect.expand(self.hover_padding))
    }

    #[must_use]
    pub fn point_hit_rect(&self) -> Option<DeviceRect> {
        self.point_rect.map(|rect| rect.expand(self.hover_padding))
    }

    /// Union of the marker point and its padded point and label rects.
    #[must_use]
    pub fn hovered_rect(&self) -> DeviceRect {
        let mut hovered = DeviceRect::new(self.device_point.x, self.device_point.y, 1, 1);
        if let Some(point) = self.point_hit_rect() {
            hovered = hovered.union(point);
        }
        if let Some(label) = self.label_rect.filter(|rect| rect.width > 0) {
            hovered = hovered.union(label.expand(self.hover_padding));
        }
        hovered
    }
}

/// Lays out every marker of one pass in ascending device x order.
///
/// The stack must already be reset for this pass.
pub fn layout_markers(
    markers: &[Annotation],
    viewport: Viewport,
    config: MarkerLayoutConfig,
    stack: &mut LabelStack,
) -> AnnotationResult<IndexMap<AnnotationId, MarkerGeometry>> {
    let config = config.validate()?;

    let mut ordered = Vec::with_capacity(markers.len());
    for marker in markers {
        if !marker.x_value.is_finite() || !marker.y_value.is_finite() {
            return Err(AnnotationError::InvalidData(format!(
                "marker {} position must be finite",
                marker.id.0
            )));
        }
        ordered.push(marker);
    }
    let mapper = CoordinateMapper::new(viewport);
    ordered.sort_by(|a, b| {
        OrderedFloat(mapper.scaled_x(a.x_value))
            .cmp(&OrderedFloat(mapper.scaled_x(b.x_value)))
            .then_with(|| a.series_index.cmp(&b.series_index))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut placed = IndexMap::with_capacity(ordered.len());
    for marker in ordered {
        if let Some(geometry) = layout_marker(marker, viewport, config, stack) {
            placed.insert(marker.id, geometry);
        }
    }
    Ok(placed)
}

/// Computes the label rectangle and orientation of one marker.
///
/// Returns `None` for a hidden marker unless hidden markers are shown.
pub fn layout_marker(
    marker: &Annotation,
    viewport: Viewport,
    config: MarkerLayoutConfig,
    stack: &mut LabelStack,
) -> Option<MarkerGeometry> {
    if !marker.visible && !config.show_hidden {
        return None;
    }

    let mapper = CoordinateMapper::new(viewport);
    let device_point = mapper.to_device(marker.x_value, marker.y_value);
    let mode = marker.placement_mode;

    let point_rect = config.display.shows_point().then(|| {
        let size = config.point_size_px;
        DeviceRect::new(
            device_point.x.saturating_sub(size / 2),
            device_point.y.saturating_sub(size / 2),
            size,
            size,
        )
    });

    let label_rect = if config.display.shows_label() {
        marker
            .resolved_label_size(config.label_char_width_px, config.label_height_px)
            .and_then(|size| {
                let rect = offset_label_rect(mode, device_point, size, viewport, config);
                let rect = correct_borders(rect, mode.is_vertical(), viewport);
                let rect = match mode.stack_side() {
                    Some(side) => stack.place(rect, side.grows_up(), rect.height, marker.id)?,
                    None => rect,
                };
                Some(rect.translate(marker.manual_offset.dx, marker.manual_offset.dy))
            })
    } else {
        None
    };

    Some(MarkerGeometry {
        id: marker.id,
        placement_mode: mode,
        device_point,
        point_rect,
        label_rect,
        is_vertical: mode.is_vertical(),
        hover_padding: config.hover_padding_px,
        is_hidden: !marker.visible,
        use_default_color: config.use_default_color || !marker.has_custom_color,
        graph_top: viewport.graph_top,
        graph_bottom: viewport.graph_bottom,
    })
}

fn offset_label_rect(
    mode: PlacementMode,
    point: DevicePoint,
    size: LabelSize,
    viewport: Viewport,
    config: MarkerLayoutConfig,
) -> DeviceRect {
    let offset = config.label_offset_px;

    if mode.is_vertical() {
        let painted = size.rotated();
        let x = point.x.saturating_sub(painted.width / 2);
        let y = match mode {
            PlacementMode::VerticalAboveGraph => {
                point.y.saturating_sub(painted.height).saturating_sub(offset)
            }
            PlacementMode::VerticalBelowGraph => point.y.saturating_add(offset),
            PlacementMode::VerticalTopChart => viewport.graph_top.saturating_add(offset),
            _ => viewport
                .graph_bottom
                .saturating_sub(painted.height)
                .saturating_sub(offset),
        };
        return DeviceRect::new(x, y, painted.width, painted.height);
    }

    let (width, height) = (size.width, size.height);
    let above_y = point.y.saturating_sub(height).saturating_sub(offset);
    let below_y = point.y.saturating_add(offset);
    let middle_y = point.y.saturating_sub(height / 2);
    let (x, y) = match mode {
        PlacementMode::HorizontalAboveGraphLeft => (point.x.saturating_sub(width), above_y),
        PlacementMode::HorizontalAboveGraphCentered => {
            (point.x.saturating_sub(width / 2), above_y)
        }
        PlacementMode::HorizontalAboveGraphRight => (point.x, above_y),
        PlacementMode::HorizontalBelowGraphLeft => (point.x.saturating_sub(width), below_y),
        PlacementMode::HorizontalBelowGraphCentered => {
            (point.x.saturating_sub(width / 2), below_y)
        }
        PlacementMode::HorizontalBelowGraphRight => (point.x, below_y),
        PlacementMode::HorizontalGraphLeft => {
            (point.x.saturating_sub(width).saturating_sub(offset), middle_y)
        }
        _ => (point.x.saturating_add(offset), middle_y),
    };
    DeviceRect::new(x, y, width, height)
}

/// Keeps a label inside the chart: left edge at the origin, right edge of the
/// virtual graph for vertical labels, then the plot's top and bottom for all.
fn correct_borders(mut rect: DeviceRect, is_vertical: bool, viewport: Viewport) -> DeviceRect {
    if is_vertical {
        if viewport.scroll_offset_x <= 0.0 && rect.x < 0 {
            rect.x = 0;
        }

        let scroll = CoordinateMapper::new(viewport).scroll_px();
        let virtual_right = viewport.virtual_width.saturating_sub(scroll);
        if rect.right() > virtual_right {
            rect.x = virtual_right - rect.width;
        }
    }

    if rect.y < viewport.graph_top {
        rect.y = viewport.graph_top;
    } else if rect.bottom() > viewport.graph_bottom {
        rect.y = (viewport.graph_bottom - rect.height).max(viewport.graph_top);
    }
    rect
}
