//! Layout algorithms run once per draw pass.
//!
//! Each module is a pure function of its inputs plus the pass-scoped
//! [`LabelStack`]; none of them keeps state across passes.

pub mod label_stack;
pub mod markers;
pub mod photo_clusters;
pub mod segments;
pub mod snapshot;

pub use label_stack::{LabelStack, LabelStackStats};
pub use markers::{
    MarkerDisplay, MarkerGeometry, MarkerLayoutConfig, layout_marker, layout_markers,
};
pub use photo_clusters::{PhotoCluster, PhotoClusterer};
pub use segments::{
    SegmentLabelGeometry, SegmentLayoutConfig, TitleSegmentGeometry, layout_segment_labels,
    layout_title_segments,
};
pub use snapshot::{LayoutSnapshot, LayoutStats, PhotoClusterLayer};
