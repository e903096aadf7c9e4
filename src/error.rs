//! Error types for report generation.
//!
//! The assembler itself is total; errors only come from the edges: retrieval,
//! configuration, rendering and I/O.

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while producing a report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither the content source nor the user supplied any material
    #[error("No source content found for topic '{0}'")]
    RetrievalEmpty(String),

    /// The content source itself failed
    #[error("Content source error: {0}")]
    Source(String),

    /// The rendering canvas failed to produce a buffer
    #[error("Rendering failed: {0}")]
    Rendering(String),

    /// Configuration is unusable (e.g. margins leave no content area)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap any displayable cause as a rendering failure.
    pub fn rendering(cause: impl std::fmt::Display) -> Self {
        Error::Rendering(cause.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_empty_error() {
        let err = Error::RetrievalEmpty("Quantum Foo".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("No source content"));
        assert!(msg.contains("Quantum Foo"));
    }

    #[test]
    fn test_rendering_error_keeps_cause() {
        let err = Error::rendering("canvas exhausted");
        assert_eq!(format!("{}", err), "Rendering failed: canvas exhausted");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(format!("{}", err).contains("missing.json"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
