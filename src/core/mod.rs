pub mod annotation;
pub mod coordinate;
pub mod types;

pub use annotation::{
    Annotation, AnnotationId, PhotoAnnotation, PhotoCategory, PhotoKind, PlacementMode,
    SegmentAnnotation, StackSide, TitleSegment,
};
pub use coordinate::{CoordinateMapper, DEVICE_PIXEL_LIMIT, to_device};
pub use types::{DeviceOffset, DevicePoint, DeviceRect, LabelSize, Viewport};
