//! Unified error handling.
//!
//! Provides a unified `AppError` type for everything that can go wrong in the
//! storefront. Nothing here is fatal to the page: event handlers log the
//! error with [`AppError::report`] and carry on.

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;
use lip_glaze_core::I18nError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading or writing browser storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Persisted data could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An HTML fragment failed to render.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// A translation resource was rejected.
    #[error("Translation error: {0}")]
    I18n(#[from] I18nError),

    /// Configuration was invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A DOM call threw.
    #[error("DOM error: {0}")]
    Dom(String),

    /// Logging could not be installed.
    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

impl AppError {
    /// Log this error with the action that produced it.
    pub fn report(&self, action: &str) {
        tracing::error!(error = %self, action, "Storefront action failed");
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(StorageError::Unavailable);
        assert_eq!(err.to_string(), "Storage error: Storage unavailable");

        let err = AppError::Dom("productGrid detached".to_string());
        assert_eq!(err.to_string(), "DOM error: productGrid detached");
    }

    #[test]
    fn test_app_error_from_config() {
        let err = AppError::from(ConfigError::InvalidValue(
            "cart_key".to_string(),
            "must not be empty".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "Config error: Invalid configuration value cart_key: must not be empty"
        );
    }
}
