use crate::error::{AnnotationError, AnnotationResult};

use super::AnnotationConfig;

pub(super) fn validate_annotation_config(
    config: AnnotationConfig,
) -> AnnotationResult<AnnotationConfig> {
    if config.segment_label_gap_px < 0 {
        return Err(AnnotationError::InvalidConfig(
            "segment label gap must be >= 0".to_owned(),
        ));
    }
    if config.tooltip_margin_px < 0 {
        return Err(AnnotationError::InvalidConfig(
            "tooltip margin must be >= 0".to_owned(),
        ));
    }
    config.marker_layout_config().validate()?;
    config.clusterer().validate()?;
    Ok(config)
}
