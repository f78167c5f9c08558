use serde::{Deserialize, Serialize};

use crate::error::AnnotationResult;
use crate::extensions::{MarkerDisplay, MarkerLayoutConfig, PhotoClusterer, SegmentLayoutConfig};
use crate::interaction::{PinLocation, TooltipAnchor, TooltipOrientation};

use super::validation::validate_annotation_config;

/// Public annotation engine configuration.
///
/// Serializable so host applications can persist the toggles next to their
/// own preferences; every field has a serde default so older payloads load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationConfig {
    #[serde(default)]
    pub show_hidden_markers: bool,
    #[serde(default)]
    pub marker_display: MarkerDisplay,
    #[serde(default)]
    pub use_default_color: bool,
    #[serde(default = "default_hover_padding_px")]
    pub hover_padding_px: i32,
    #[serde(default = "default_marker_point_size_px")]
    pub marker_point_size_px: i32,
    #[serde(default = "default_label_offset_px")]
    pub label_offset_px: i32,
    #[serde(default = "default_label_char_width_px")]
    pub label_char_width_px: f64,
    #[serde(default = "default_label_height_px")]
    pub label_height_px: i32,
    #[serde(default = "default_segment_label_gap_px")]
    pub segment_label_gap_px: i32,
    /// Number of remembered label bands per side; `0` disables stacking.
    #[serde(default = "default_stacked_label_capacity")]
    pub stacked_label_capacity: usize,
    #[serde(default = "default_cluster_base_width_px")]
    pub cluster_base_width_px: i32,
    #[serde(default = "default_cluster_badge_height_px")]
    pub cluster_badge_height_px: i32,
    #[serde(default)]
    pub tooltip_pin_location: PinLocation,
    #[serde(default)]
    pub tooltip_anchor: TooltipAnchor,
    #[serde(default)]
    pub tooltip_orientation: TooltipOrientation,
    #[serde(default = "default_tooltip_margin_px")]
    pub tooltip_margin_px: i32,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            show_hidden_markers: false,
            marker_display: MarkerDisplay::default(),
            use_default_color: false,
            hover_padding_px: default_hover_padding_px(),
            marker_point_size_px: default_marker_point_size_px(),
            label_offset_px: default_label_offset_px(),
            label_char_width_px: default_label_char_width_px(),
            label_height_px: default_label_height_px(),
            segment_label_gap_px: default_segment_label_gap_px(),
            stacked_label_capacity: default_stacked_label_capacity(),
            cluster_base_width_px: default_cluster_base_width_px(),
            cluster_badge_height_px: default_cluster_badge_height_px(),
            tooltip_pin_location: PinLocation::default(),
            tooltip_anchor: TooltipAnchor::default(),
            tooltip_orientation: TooltipOrientation::default(),
            tooltip_margin_px: default_tooltip_margin_px(),
        }
    }
}

impl AnnotationConfig {
    pub fn validate(self) -> AnnotationResult<Self> {
        validate_annotation_config(self)
    }

    #[must_use]
    pub fn with_show_hidden_markers(mut self, enabled: bool) -> Self {
        self.show_hidden_markers = enabled;
        self
    }

    #[must_use]
    pub fn with_marker_display(mut self, display: MarkerDisplay) -> Self {
        self.marker_display = display;
        self
    }

    #[must_use]
    pub fn with_stacked_label_capacity(mut self, capacity: usize) -> Self {
        self.stacked_label_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_cluster_base_width_px(mut self, width: i32) -> Self {
        self.cluster_base_width_px = width;
        self
    }

    #[must_use]
    pub fn with_tooltip_pin_location(mut self, pin_location: PinLocation) -> Self {
        self.tooltip_pin_location = pin_location;
        self
    }

    #[must_use]
    pub fn with_tooltip_anchor(mut self, anchor: TooltipAnchor) -> Self {
        self.tooltip_anchor = anchor;
        self
    }

    #[must_use]
    pub fn marker_layout_config(&self) -> MarkerLayoutConfig {
        MarkerLayoutConfig {
            display: self.marker_display,
            show_hidden: self.show_hidden_markers,
            use_default_color: self.use_default_color,
            point_size_px: self.marker_point_size_px,
            label_offset_px: self.label_offset_px,
            hover_padding_px: self.hover_padding_px,
            label_char_width_px: self.label_char_width_px,
            label_height_px: self.label_height_px,
        }
    }

    #[must_use]
    pub fn segment_layout_config(&self) -> SegmentLayoutConfig {
        SegmentLayoutConfig {
            point_size_px: self.marker_point_size_px,
            label_gap_px: self.segment_label_gap_px,
            hover_padding_px: self.hover_padding_px,
            label_char_width_px: self.label_char_width_px,
            label_height_px: self.label_height_px,
        }
    }

    #[must_use]
    pub fn clusterer(&self) -> PhotoClusterer {
        PhotoClusterer::new(self.cluster_base_width_px, self.cluster_badge_height_px)
    }
}

fn default_hover_padding_px() -> i32 {
    4
}

fn default_marker_point_size_px() -> i32 {
    4
}

fn default_label_offset_px() -> i32 {
    2
}

fn default_label_char_width_px() -> f64 {
    7.0
}

fn default_label_height_px() -> i32 {
    14
}

fn default_segment_label_gap_px() -> i32 {
    2
}

fn default_stacked_label_capacity() -> usize {
    3
}

fn default_cluster_base_width_px() -> i32 {
    40
}

fn default_cluster_badge_height_px() -> i32 {
    20
}

fn default_tooltip_margin_px() -> i32 {
    3
}
