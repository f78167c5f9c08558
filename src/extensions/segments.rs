use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{
    AnnotationId, CoordinateMapper, DevicePoint, DeviceRect, SegmentAnnotation, StackSide,
    TitleSegment, Viewport,
};
use crate::error::{AnnotationError, AnnotationResult};

use super::label_stack::LabelStack;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentLayoutConfig {
    pub point_size_px: i32,
    pub label_gap_px: i32,
    pub hover_padding_px: i32,
    pub label_char_width_px: f64,
    pub label_height_px: i32,
}

impl Default for SegmentLayoutConfig {
    fn default() -> Self {
        Self {
            point_size_px: 4,
            label_gap_px: 2,
            hover_padding_px: 4,
            label_char_width_px: 7.0,
            label_height_px: 14,
        }
    }
}

/// Painted geometry of one segment value label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentLabelGeometry {
    pub id: AnnotationId,
    pub side: StackSide,
    pub device_point: DevicePoint,
    pub point_rect: DeviceRect,
    /// `None` when the segment has no value text or the label was suppressed.
    pub label_rect: Option<DeviceRect>,
    pub hover_padding: i32,
}

impl SegmentLabelGeometry {
    #[must_use]
    pub fn label_hit_rect(&self) -> Option<DeviceRect> {
        self.label_rect.map(|rect| rect.expand(self.hover_padding))
    }

    #[must_use]
    pub fn point_hit_rect(&self) -> DeviceRect {
        self.point_rect.expand(self.hover_padding)
    }
}

/// Places segment value labels above rising and below falling segments,
/// stacking them through `stack` in ascending device x order.
pub fn layout_segment_labels(
    segments: &[SegmentAnnotation],
    viewport: Viewport,
    config: SegmentLayoutConfig,
    stack: &mut LabelStack,
) -> AnnotationResult<IndexMap<AnnotationId, SegmentLabelGeometry>> {
    for segment in segments {
        if !segment.x_value.is_finite() || !segment.y_value.is_finite() {
            return Err(AnnotationError::InvalidData(format!(
                "segment {} position must be finite",
                segment.id.0
            )));
        }
    }

    let mapper = CoordinateMapper::new(viewport);
    let mut ordered: Vec<&SegmentAnnotation> = segments.iter().collect();
    ordered.sort_by(|a, b| {
        OrderedFloat(mapper.scaled_x(a.x_value))
            .cmp(&OrderedFloat(mapper.scaled_x(b.x_value)))
            .then_with(|| a.series_index.cmp(&b.series_index))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut placed = IndexMap::with_capacity(ordered.len());
    for segment in ordered {
        let device_point = mapper.to_device(segment.x_value, segment.y_value);
        let side = segment.stack_side();
        let size = config.point_size_px;
        let point_rect = DeviceRect::new(
            device_point.x.saturating_sub(size / 2),
            device_point.y.saturating_sub(size / 2),
            size,
            size,
        );

        let label_rect = segment
            .resolved_label_size(config.label_char_width_px, config.label_height_px)
            .and_then(|label| {
                let y = match side {
                    StackSide::Above => device_point
                        .y
                        .saturating_sub(label.height)
                        .saturating_sub(config.label_gap_px),
                    StackSide::Below => device_point.y.saturating_add(config.label_gap_px),
                };
                let candidate = DeviceRect::new(
                    device_point.x.saturating_sub(label.width / 2),
                    y,
                    label.width,
                    label.height,
                );
                stack.place(candidate, side.grows_up(), label.height, segment.id)
            });

        placed.insert(
            segment.id,
            SegmentLabelGeometry {
                id: segment.id,
                side,
                device_point,
                point_rect,
                label_rect,
                hover_padding: config.hover_padding_px,
            },
        );
    }
    Ok(placed)
}

/// Painted title band of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleSegmentGeometry {
    pub index: usize,
    pub device_x: i32,
    pub device_width: i32,
    pub device_y_title: i32,
    pub title_height: i32,
}

impl TitleSegmentGeometry {
    #[must_use]
    pub fn rect(&self) -> DeviceRect {
        DeviceRect::new(
            self.device_x,
            self.device_y_title,
            self.device_width,
            self.title_height,
        )
    }

    /// Title hit band: strictly inside the segment's x range and between the
    /// chart's top pixel row and the bottom of the title.
    #[must_use]
    pub fn is_hit(&self, pointer: DevicePoint) -> bool {
        pointer.x > self.device_x
            && pointer.x < self.device_x + self.device_width
            && pointer.y > 0
            && pointer.y < self.device_y_title + self.title_height
    }
}

#[must_use]
pub fn layout_title_segments(
    titles: &[TitleSegment],
    viewport: Viewport,
) -> Vec<TitleSegmentGeometry> {
    let mapper = CoordinateMapper::new(viewport);
    titles
        .iter()
        .filter(|title| title.x_start.is_finite() && title.x_end.is_finite())
        .map(|title| {
            let start = mapper.to_device_x(title.x_start);
            let end = mapper.to_device_x(title.x_end);
            TitleSegmentGeometry {
                index: title.index,
                device_x: start.min(end),
                device_width: (end - start).abs(),
                device_y_title: viewport.graph_top,
                title_height: title.title_height.max(0),
            }
        })
        .collect()
}
