/// Errors that can occur converting documents to and from JSON
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}
