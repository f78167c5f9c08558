use serde::{Deserialize, Serialize};

use crate::error::{AnnotationError, AnnotationResult};

/// Per-draw snapshot of the chart surface.
///
/// Recomputed by the host on every paint, resize or zoom and read-only for
/// the duration of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scale_x: f64,
    pub scale_y: f64,
    pub scroll_offset_x: f64,
    pub graph_top: i32,
    pub graph_bottom: i32,
    pub visible_width: i32,
    pub virtual_width: i32,
    /// Data-space value drawn at `graph_bottom`.
    pub value_bottom: f64,
}

impl Viewport {
    /// Creates an unscrolled, unzoomed viewport whose bottom edge maps value `0`.
    #[must_use]
    pub fn new(
        scale_x: f64,
        scale_y: f64,
        graph_top: i32,
        graph_bottom: i32,
        visible_width: i32,
    ) -> Self {
        Self {
            scale_x,
            scale_y,
            scroll_offset_x: 0.0,
            graph_top,
            graph_bottom,
            visible_width,
            virtual_width: visible_width,
            value_bottom: 0.0,
        }
    }

    #[must_use]
    pub fn with_scroll_offset_x(mut self, scroll_offset_x: f64) -> Self {
        self.scroll_offset_x = scroll_offset_x;
        self
    }

    #[must_use]
    pub fn with_virtual_width(mut self, virtual_width: i32) -> Self {
        self.virtual_width = virtual_width;
        self
    }

    #[must_use]
    pub fn with_value_bottom(mut self, value_bottom: f64) -> Self {
        self.value_bottom = value_bottom;
        self
    }

    #[must_use]
    pub fn graph_height(self) -> i32 {
        self.graph_bottom - self.graph_top
    }

    /// `virtual_width / visible_width`, or `1.0` for a degenerate surface.
    #[must_use]
    pub fn zoom_ratio(self) -> f64 {
        if self.visible_width <= 0 || self.virtual_width <= 0 {
            return 1.0;
        }
        f64::from(self.virtual_width) / f64::from(self.visible_width)
    }

    /// Zero-sized surfaces are valid and simply produce empty layouts.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.visible_width <= 0 || self.graph_height() <= 0
    }

    pub fn validate(self) -> AnnotationResult<Self> {
        for (field, value) in [
            ("scale_x", self.scale_x),
            ("scale_y", self.scale_y),
            ("scroll_offset_x", self.scroll_offset_x),
            ("value_bottom", self.value_bottom),
        ] {
            if !value.is_finite() {
                return Err(AnnotationError::InvalidViewport { field, value });
            }
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DevicePoint {
    pub x: i32,
    pub y: i32,
}

impl DevicePoint {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset_by(self, offset: DeviceOffset) -> Self {
        Self::new(self.x + offset.dx, self.y + offset.dy)
    }
}

/// Pixel displacement: manual label offsets and tooltip drag offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DeviceOffset {
    pub dx: i32,
    pub dy: i32,
}

impl DeviceOffset {
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

impl std::ops::Add for DeviceOffset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

/// Axis-aligned rectangle in device (or screen) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DeviceRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DeviceRect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> i32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> i32 {
        self.y + self.height
    }

    #[must_use]
    pub fn top_left(self) -> DevicePoint {
        DevicePoint::new(self.x, self.y)
    }

    #[must_use]
    pub fn center(self) -> DevicePoint {
        DevicePoint::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Strict containment: a pointer on a boundary pixel is outside.
    #[must_use]
    pub fn contains_strict(self, point: DevicePoint) -> bool {
        self.x < point.x && point.x < self.right() && self.y < point.y && point.y < self.bottom()
    }

    /// Inclusive containment of the top-left edge, exclusive of the bottom-right.
    #[must_use]
    pub fn contains_point(self, point: DevicePoint) -> bool {
        self.x <= point.x && point.x < self.right() && self.y <= point.y && point.y < self.bottom()
    }

    #[must_use]
    pub fn contains_rect(self, other: DeviceRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Grows the rectangle by `padding` on all four sides.
    #[must_use]
    pub fn expand(self, padding: i32) -> Self {
        Self::new(
            self.x - padding,
            self.y - padding,
            self.width + 2 * padding,
            self.height + 2 * padding,
        )
    }

    #[must_use]
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    #[must_use]
    pub fn with_origin(self, origin: DevicePoint) -> Self {
        Self::new(origin.x, origin.y, self.width, self.height)
    }

    #[must_use]
    pub fn union(self, other: DeviceRect) -> Self {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }

    #[must_use]
    pub fn intersects(self, other: DeviceRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Overlap of the vertical bands `[y, bottom)` only, ignoring x.
    #[must_use]
    pub fn overlaps_vertically(self, other: DeviceRect) -> bool {
        self.y < other.bottom() && other.y < self.bottom()
    }
}

/// Measured (or estimated) size of a label's text box, before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LabelSize {
    pub width: i32,
    pub height: i32,
}

impl LabelSize {
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Estimates the text box from the character count when the host did not
    /// measure the label. Empty text yields a zero-width box.
    #[must_use]
    pub fn estimate(text: &str, char_width_px: f64, height_px: i32) -> Self {
        let chars = text.chars().count();
        if chars == 0 {
            return Self::new(0, height_px);
        }
        Self::new((chars as f64 * char_width_px).round() as i32, height_px)
    }

    /// Width and height swapped, as painted for a label rotated by 90 degrees.
    #[must_use]
    pub fn rotated(self) -> Self {
        Self::new(self.height, self.width)
    }
}
