use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AnnotationError, AnnotationResult};
use crate::extensions::LayoutSnapshot;

use super::{AnnotationConfig, AnnotationEngine};

pub const ANNOTATION_CONFIG_JSON_SCHEMA_V1: u32 = 1;
pub const LAYOUT_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: AnnotationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: LayoutSnapshot,
}

impl AnnotationConfig {
    pub fn to_json_contract_v1_pretty(&self) -> AnnotationResult<String> {
        let payload = AnnotationConfigJsonContractV1 {
            schema_version: ANNOTATION_CONFIG_JSON_SCHEMA_V1,
            config: *self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            AnnotationError::Serialization(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Parses either a bare config object or the versioned envelope, then
    /// validates it.
    pub fn from_json_compat_str(input: &str) -> AnnotationResult<Self> {
        if let Ok(payload) = serde_json::from_str::<AnnotationConfigJsonContractV1>(input) {
            if payload.schema_version != ANNOTATION_CONFIG_JSON_SCHEMA_V1 {
                return Err(AnnotationError::Serialization(format!(
                    "unsupported config schema version: {}",
                    payload.schema_version
                )));
            }
            return payload.config.validate();
        }
        let config: AnnotationConfig = serde_json::from_str(input).map_err(|e| {
            AnnotationError::Serialization(format!("failed to parse config json payload: {e}"))
        })?;
        config.validate()
    }

    /// Loads a persisted config, falling back to defaults when the payload is
    /// unreadable or invalid.
    #[must_use]
    pub fn from_json_or_default(input: &str) -> Self {
        Self::from_json_compat_str(input).unwrap_or_else(|error| {
            warn!(%error, "annotation config rejected, using defaults");
            Self::default()
        })
    }
}

impl LayoutSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> AnnotationResult<String> {
        let payload = LayoutSnapshotJsonContractV1 {
            schema_version: LAYOUT_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            AnnotationError::Serialization(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> AnnotationResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<LayoutSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: LayoutSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            AnnotationError::Serialization(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != LAYOUT_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(AnnotationError::Serialization(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl AnnotationEngine {
    pub fn snapshot_json_contract_v1_pretty(&self) -> AnnotationResult<String> {
        self.snapshot.to_json_contract_v1_pretty()
    }

    pub fn config_json_contract_v1_pretty(&self) -> AnnotationResult<String> {
        self.config.to_json_contract_v1_pretty()
    }
}
