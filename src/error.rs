// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Nothing in the core is fatal: storage errors degrade to an empty store on
//! read and are logged on write, roster errors become a display message.

use crate::config::ConfigError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Failed to read marker file: {0}")]
    StorageRead(String),

    #[error("Failed to write marker file: {0}")]
    StorageWrite(String),

    #[error("Failed to decode markers: {0}")]
    Decode(String),

    #[error("Failed to encode markers: {0}")]
    Encode(String),

    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Failed to load friends: {0}")]
    RosterLoad(String),

    #[error("Sign in was cancelled")]
    AuthenticationCancelled,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether this error came from the marker file layer.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            AppError::StorageUnavailable(_)
                | AppError::StorageRead(_)
                | AppError::StorageWrite(_)
                | AppError::Decode(_)
                | AppError::Encode(_)
        )
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, AppError>;
