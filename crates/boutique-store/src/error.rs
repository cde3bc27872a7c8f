//! # Store Error Types
//!
//! Error types for storage, configuration and command operations.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    Storage      │  │  Configuration  │  │       Domain            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Unavailable    │  │  InvalidConfig  │  │  Core (wraps            │ │
//! │  │  Io             │  │  LoadFailed     │  │  CoreError /            │ │
//! │  │  Serialization  │  │  SaveFailed     │  │  ValidationError)       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Storage errors never reach the UI from dispatch: the persistence      │
//! │  observer logs them and moves on.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use boutique_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store error type.
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// The durable storage backend cannot be used (quota, lock poisoned,
    /// writer task gone).
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode failure.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage key that cannot be used as a file name.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

impl StoreError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidConfig(_)
                | StoreError::ConfigLoadFailed(_)
                | StoreError::ConfigSaveFailed(_)
        )
    }

    /// Returns the validation error inside, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            StoreError::Core(CoreError::Validation(err)) => Some(err),
            _ => None,
        }
    }
}
