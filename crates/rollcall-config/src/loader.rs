// SPDX-FileCopyrightText: 2026 Rollcall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./rollcall.toml` > `~/.config/rollcall/rollcall.toml`
//! > `/etc/rollcall/rollcall.toml` with environment variable overrides via the
//! `ROLLCALL_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::RollcallConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/rollcall/rollcall.toml` (system-wide)
/// 3. `~/.config/rollcall/rollcall.toml` (user XDG config)
/// 4. `./rollcall.toml` (local directory)
/// 5. `ROLLCALL_*` environment variables
pub fn load_config() -> Result<RollcallConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<RollcallConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RollcallConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RollcallConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RollcallConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(RollcallConfig::default()))
        .merge(Toml::file("/etc/rollcall/rollcall.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("rollcall/rollcall.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("rollcall.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `ROLLCALL_STORAGE_DATABASE_PATH` must map
/// to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("ROLLCALL_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: ROLLCALL_SERVER_PORT -> "server_port"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("server_", "server.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.database_path, "./test.db");
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [server]
            port = 9090

            [storage]
            database_path = "/tmp/other.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.storage.database_path, "/tmp/other.db");
        // Untouched sections keep their defaults.
        assert_eq!(config.service.seed_name, "John Doe");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = load_config_from_str(
            r#"
            [server]
            prot = 9090
            "#,
        );
        assert!(result.is_err(), "unknown key should fail extraction");
    }

    #[test]
    fn env_var_overrides_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "rollcall.toml",
                r#"
                [server]
                port = 9090
                "#,
            )?;
            jail.set_env("ROLLCALL_SERVER_PORT", "7070");
            jail.set_env("ROLLCALL_STORAGE_DATABASE_PATH", "/tmp/env.db");

            let config: RollcallConfig = Figment::new()
                .merge(Serialized::defaults(RollcallConfig::default()))
                .merge(Toml::file("rollcall.toml"))
                .merge(env_provider())
                .extract()?;

            assert_eq!(config.server.port, 7070);
            assert_eq!(config.storage.database_path, "/tmp/env.db");
            Ok(())
        });
    }
}
