// SPDX-FileCopyrightText: 2026 Rollcall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and non-empty paths.

use crate::diagnostic::ConfigError;
use crate::model::RollcallConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &RollcallConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate server.host is not empty
    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    }

    // Validate server.host looks like a valid IP or hostname
    if !config.server.host.trim().is_empty() {
        let host = config.server.host.trim();
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    // Port 0 would ask the kernel for an ephemeral port, which makes the
    // listening address unpredictable.
    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must be non-zero".to_string(),
        });
    }

    // Validate database_path is not empty
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate seed_name is not empty
    if config.service.seed_name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "service.seed_name must not be empty".to_string(),
        });
    }

    // Validate log_level is a recognized level
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.service.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level `{}` is not one of: {}",
                config.service.log_level,
                valid_levels.join(", ")
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
