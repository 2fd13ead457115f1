//! Error types for the flat-file schema layer
//!
//! Registry reads and writes never fail. These errors only come from the
//! surfaces around it: loading configuration and rendering reports.

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema layer errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err: SchemaError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "flat-schema.toml").into();
        assert_eq!(err.to_string(), "IO error: flat-schema.toml");
    }

    #[test]
    fn test_json_error_conversion() {
        let err: SchemaError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, SchemaError::Json(_)));
    }
}
