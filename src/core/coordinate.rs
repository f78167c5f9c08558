use crate::core::{DevicePoint, Viewport};

/// Maps data-space values onto device pixels for one viewport snapshot.
///
/// Layout and hit testing both go through this type so painted geometry and
/// hit geometry agree pixel for pixel. Results outside the plot area are
/// returned unclamped; clamping is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    viewport: Viewport,
}

impl CoordinateMapper {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        self.viewport
    }

    /// Unrounded x position in virtual (unscrolled) pixels. Ascending in
    /// device x for any sign of `scale_x`.
    #[must_use]
    pub fn scaled_x(self, x_value: f64) -> f64 {
        x_value * self.viewport.scale_x
    }

    #[must_use]
    pub fn to_virtual_x(self, x_value: f64) -> i32 {
        to_pixel(self.scaled_x(x_value))
    }

    /// Scroll offset as whole pixels, rounded half up so that shifting the
    /// offset by `n` pixels shifts every device x by exactly `n`.
    #[must_use]
    pub fn scroll_px(self) -> i32 {
        to_pixel((self.viewport.scroll_offset_x + 0.5).floor())
    }

    #[must_use]
    pub fn to_device_x(self, x_value: f64) -> i32 {
        self.to_virtual_x(x_value) - self.scroll_px()
    }

    #[must_use]
    pub fn to_device_y(self, y_value: f64) -> i32 {
        let scaled = (y_value - self.viewport.value_bottom) * self.viewport.scale_y;
        self.viewport.graph_bottom.saturating_sub(to_pixel(scaled))
    }

    #[must_use]
    pub fn to_device(self, x_value: f64, y_value: f64) -> DevicePoint {
        DevicePoint::new(self.to_device_x(x_value), self.to_device_y(y_value))
    }
}

/// Largest magnitude a projected pixel may take. Keeps rect arithmetic on
/// far off-screen annotations clear of `i32` overflow.
pub const DEVICE_PIXEL_LIMIT: i32 = 1 << 28;

fn to_pixel(value: f64) -> i32 {
    let limit = f64::from(DEVICE_PIXEL_LIMIT);
    value.round().clamp(-limit, limit) as i32
}

/// Convenience wrapper around [`CoordinateMapper::to_device`].
#[must_use]
pub fn to_device(x_value: f64, y_value: f64, viewport: Viewport) -> DevicePoint {
    CoordinateMapper::new(viewport).to_device(x_value, y_value)
}
