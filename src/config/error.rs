//! Configuration Error Types

use thiserror::Error;

/// Errors raised while loading [`super::BatchOptions`]
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Failure reported by the layered `config` sources
    #[error("Failed to load configuration from '{source_name}': {error}")]
    LoadError { source_name: String, error: String },
}

impl ConfigurationError {
    /// Create a load error
    pub fn load_error<S: Into<String>, E: std::fmt::Display>(source_name: S, error: E) -> Self {
        Self::LoadError {
            source_name: source_name.into(),
            error: error.to_string(),
        }
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigurationError>;
