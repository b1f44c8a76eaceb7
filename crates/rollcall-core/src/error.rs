// SPDX-FileCopyrightText: 2026 Rollcall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Rollcall service.

use thiserror::Error;

/// The primary error type used across all Rollcall crates.
#[derive(Debug, Error)]
pub enum RollcallError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database open, migration, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// HTTP server errors (bind failure, serve loop failure).
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_displays_source() {
        let err = RollcallError::Storage {
            source: "disk is full".into(),
        };
        assert_eq!(err.to_string(), "storage error: disk is full");
    }

    #[test]
    fn server_error_displays_message() {
        let err = RollcallError::Server {
            message: "failed to bind 0.0.0.0:8080".to_string(),
            source: None,
        };
        assert!(err.to_string().contains("failed to bind"));
    }
}
