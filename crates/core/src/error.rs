#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    #[error("invalid radius: {0} (must be a positive, finite number of kilometres)")]
    InvalidRadius(f64),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("{0}")]
    Duplicate(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("failed to read registry file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write registry file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize registry: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize registry: {0}")]
    Deserialization(serde_json::Error),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
