#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("Failed to read schema {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
