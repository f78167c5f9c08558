//! Host-facing facade: one [`AnnotationEngine`] per chart.

mod engine;
mod engine_config;
mod interaction_controller;
mod json_contract;
mod layer_registry;
mod validation;

pub use engine::{AnnotationEngine, AnnotationLayers};
pub use engine_config::AnnotationConfig;
pub use json_contract::{
    ANNOTATION_CONFIG_JSON_SCHEMA_V1, AnnotationConfigJsonContractV1,
    LAYOUT_SNAPSHOT_JSON_SCHEMA_V1, LayoutSnapshotJsonContractV1,
};
pub use layer_registry::{LayerId, LayerKind, LayerRegistry, RedrawCallback};

pub use crate::extensions::{LayoutSnapshot, LayoutStats};
