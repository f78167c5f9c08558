use serde::{Deserialize, Serialize};

use crate::core::{DeviceOffset, LabelSize};

/// Caller-assigned identity of an annotation, stable across draw passes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct AnnotationId(pub u64);

/// Named label positions relative to the marker point.
///
/// Vertical variants rotate the label by 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlacementMode {
    VerticalAboveGraph,
    VerticalBelowGraph,
    VerticalTopChart,
    VerticalBottomChart,
    HorizontalAboveGraphLeft,
    #[default]
    HorizontalAboveGraphCentered,
    HorizontalAboveGraphRight,
    HorizontalBelowGraphLeft,
    HorizontalBelowGraphCentered,
    HorizontalBelowGraphRight,
    HorizontalGraphLeft,
    HorizontalGraphRight,
}

/// Side of the curve a stacked label grows toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackSide {
    Above,
    Below,
}

impl StackSide {
    #[must_use]
    pub fn grows_up(self) -> bool {
        self == Self::Above
    }
}

impl PlacementMode {
    /// All modes in their persisted index order.
    pub const ALL: [Self; 12] = [
        Self::VerticalAboveGraph,
        Self::VerticalBelowGraph,
        Self::VerticalTopChart,
        Self::VerticalBottomChart,
        Self::HorizontalAboveGraphLeft,
        Self::HorizontalAboveGraphCentered,
        Self::HorizontalAboveGraphRight,
        Self::HorizontalBelowGraphLeft,
        Self::HorizontalBelowGraphCentered,
        Self::HorizontalBelowGraphRight,
        Self::HorizontalGraphLeft,
        Self::HorizontalGraphRight,
    ];

    /// Resolves a persisted numeric position; unknown values fall back to
    /// [`PlacementMode::HorizontalAboveGraphCentered`].
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|mode| *mode == self)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(
            self,
            Self::VerticalAboveGraph
                | Self::VerticalBelowGraph
                | Self::VerticalTopChart
                | Self::VerticalBottomChart
        )
    }

    /// Stacking side for labels that take part in overlap avoidance.
    #[must_use]
    pub fn stack_side(self) -> Option<StackSide> {
        match self {
            Self::HorizontalAboveGraphLeft
            | Self::HorizontalAboveGraphCentered
            | Self::HorizontalAboveGraphRight => Some(StackSide::Above),
            Self::HorizontalBelowGraphLeft
            | Self::HorizontalBelowGraphCentered
            | Self::HorizontalBelowGraphRight => Some(StackSide::Below),
            _ => None,
        }
    }
}

/// Point marker attached to a position on the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub series_index: usize,
    /// Pre-scaled data-space x.
    pub x_value: f64,
    pub y_value: f64,
    pub visible: bool,
    pub placement_mode: PlacementMode,
    pub label: Option<String>,
    /// Measured text box; estimated from `label` when absent.
    pub label_size: Option<LabelSize>,
    pub manual_offset: DeviceOffset,
    pub has_custom_color: bool,
}

impl Annotation {
    #[must_use]
    pub fn new(id: u64, series_index: usize, x_value: f64, y_value: f64) -> Self {
        Self {
            id: AnnotationId(id),
            series_index,
            x_value,
            y_value,
            visible: true,
            placement_mode: PlacementMode::default(),
            label: None,
            label_size: None,
            manual_offset: DeviceOffset::ZERO,
            has_custom_color: false,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_label_size(mut self, size: LabelSize) -> Self {
        self.label_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_placement(mut self, mode: PlacementMode) -> Self {
        self.placement_mode = mode;
        self
    }

    #[must_use]
    pub fn with_manual_offset(mut self, dx: i32, dy: i32) -> Self {
        self.manual_offset = DeviceOffset::new(dx, dy);
        self
    }

    #[must_use]
    pub fn with_custom_color(mut self) -> Self {
        self.has_custom_color = true;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Text box of the label, `None` when the marker has no label at all.
    #[must_use]
    pub fn resolved_label_size(&self, char_width_px: f64, height_px: i32) -> Option<LabelSize> {
        let text = self.label.as_deref()?;
        Some(
            self.label_size
                .unwrap_or_else(|| LabelSize::estimate(text, char_width_px, height_px)),
        )
    }
}

/// End point of a tour segment carrying a value label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentAnnotation {
    pub id: AnnotationId,
    pub series_index: usize,
    pub x_value: f64,
    pub y_value: f64,
    pub label: Option<String>,
    pub label_size: Option<LabelSize>,
    /// Rising segments label above the curve, falling ones below.
    pub rising: bool,
}

impl SegmentAnnotation {
    #[must_use]
    pub fn new(id: u64, series_index: usize, x_value: f64, y_value: f64, rising: bool) -> Self {
        Self {
            id: AnnotationId(id),
            series_index,
            x_value,
            y_value,
            label: None,
            label_size: None,
            rising,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_label_size(mut self, size: LabelSize) -> Self {
        self.label_size = Some(size);
        self
    }

    #[must_use]
    pub fn stack_side(&self) -> StackSide {
        if self.rising {
            StackSide::Above
        } else {
            StackSide::Below
        }
    }

    #[must_use]
    pub fn resolved_label_size(&self, char_width_px: f64, height_px: i32) -> Option<LabelSize> {
        let text = self.label.as_deref()?;
        Some(
            self.label_size
                .unwrap_or_else(|| LabelSize::estimate(text, char_width_px, height_px)),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhotoKind {
    /// Photos saved with the tour.
    Tour,
    /// Photos linked to the tour by time only.
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotoAnnotation {
    pub id: AnnotationId,
    pub x_value: f64,
    /// Curve value at the photo time, `None` outside the series data range.
    pub y_value: Option<f64>,
    pub visible: bool,
}

impl PhotoAnnotation {
    #[must_use]
    pub fn new(id: u64, x_value: f64, y_value: Option<f64>) -> Self {
        Self {
            id: AnnotationId(id),
            x_value,
            y_value,
            visible: true,
        }
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Photos of one kind, ordered by ascending `x_value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoCategory {
    pub name: String,
    pub kind: PhotoKind,
    pub photos: Vec<PhotoAnnotation>,
}

impl PhotoCategory {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: PhotoKind, photos: Vec<PhotoAnnotation>) -> Self {
        Self {
            name: name.into(),
            kind,
            photos,
        }
    }
}

/// Title band of one tour segment at the top of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TitleSegment {
    pub index: usize,
    pub x_start: f64,
    pub x_end: f64,
    pub title_height: i32,
}

impl TitleSegment {
    #[must_use]
    pub fn new(index: usize, x_start: f64, x_end: f64, title_height: i32) -> Self {
        Self {
            index,
            x_start,
            x_end,
            title_height,
        }
    }
}
