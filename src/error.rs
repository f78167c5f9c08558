use thiserror::Error;

pub type AnnotationResult<T> = Result<T, AnnotationError>;

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("invalid viewport: `{field}` must be finite, got {value}")]
    InvalidViewport { field: &'static str, value: f64 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
