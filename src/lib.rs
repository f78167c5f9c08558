//! chart-annotate: annotation layout and hit testing for zoomable time-series charts.
//!
//! The crate turns data-space annotations (markers, segment values, photo
//! captures, segment titles) into device-space geometry once per draw pass,
//! resolves pointer events against that geometry and positions tooltips on
//! screen. Painting and widget plumbing stay with the host.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;

pub use api::{AnnotationConfig, AnnotationEngine, AnnotationLayers};
pub use error::{AnnotationError, AnnotationResult};
