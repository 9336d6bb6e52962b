//! Unified error type for storefront start-up.
//!
//! Store operations themselves never fail; only building the application
//! state (reading configuration, opening the storage directory) can.

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage slot could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
