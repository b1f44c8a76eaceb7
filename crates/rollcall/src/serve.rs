// SPDX-FileCopyrightText: 2026 Rollcall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `rollcall serve` command implementation.
//!
//! The startup sequence is strictly sequential: open (or create) the SQLite
//! file and apply the schema, insert the configured seed row, then bind the
//! listener and serve until killed. Any failure along the way is fatal; once
//! serving, request handling is event-driven and per-request errors stay in
//! their request.

use std::sync::Arc;

use tracing::info;

use rollcall_config::RollcallConfig;
use rollcall_core::RollcallError;
use rollcall_gateway::{AppState, HealthState, ServerConfig};
use rollcall_storage::{Database, queries};

/// Runs the `rollcall serve` command.
pub async fn run_serve(config: RollcallConfig) -> Result<(), RollcallError> {
    init_tracing(&config.service.log_level);

    info!("starting rollcall serve");

    let db = initialize_store(&config).await?;

    let state = AppState {
        db: Arc::new(db),
        health: HealthState {
            start_time: std::time::Instant::now(),
        },
    };

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    rollcall_gateway::start_server(&server_config, state).await
}

/// Open the database and insert the seed row.
///
/// The insert runs unconditionally on every startup, so each run of the
/// service appends one more seed row to an existing file. Schema creation
/// itself is idempotent and never touches prior rows.
async fn initialize_store(config: &RollcallConfig) -> Result<Database, RollcallError> {
    let db = Database::open(&config.storage.database_path).await?;

    let id = queries::users::insert_user(&db, &config.service.seed_name).await?;
    info!(
        id,
        name = %config.service.seed_name,
        path = %config.storage.database_path,
        "seed user inserted"
    );

    Ok(db)
}

/// Initialize the tracing subscriber from the configured log level.
///
/// `RUST_LOG` takes precedence over the config value when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rollcall={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tempfile::tempdir;
    use tower::ServiceExt;

    use rollcall_config::model::StorageConfig;
    use rollcall_gateway::build_router;

    fn config_for(db_path: &std::path::Path) -> RollcallConfig {
        RollcallConfig {
            storage: StorageConfig {
                database_path: db_path.to_str().unwrap().to_string(),
            },
            ..Default::default()
        }
    }

    fn state_for(db: Database) -> AppState {
        AppState {
            db: Arc::new(db),
            health: HealthState {
                start_time: std::time::Instant::now(),
            },
        }
    }

    async fn get_root(state: AppState) -> (StatusCode, String) {
        let response = build_router(state)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn startup_seeds_one_john_doe_row() {
        let dir = tempdir().unwrap();
        let config = config_for(&dir.path().join("seed.db"));

        let db = initialize_store(&config).await.unwrap();

        let users = queries::users::list_users(&db).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "John Doe");
    }

    #[tokio::test]
    async fn fresh_file_serves_single_seed_line() {
        let dir = tempdir().unwrap();
        let config = config_for(&dir.path().join("fresh.db"));

        let db = initialize_store(&config).await.unwrap();

        let (status, body) = get_root(state_for(db)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User: John Doe\n");
    }

    #[tokio::test]
    async fn second_startup_appends_another_seed_row() {
        let dir = tempdir().unwrap();
        let config = config_for(&dir.path().join("twice.db"));

        let db = initialize_store(&config).await.unwrap();
        db.close().await.unwrap();
        drop(db);

        // Same file, second startup: schema creation is a no-op, prior rows
        // survive, and one more seed row is appended.
        let db = initialize_store(&config).await.unwrap();

        let (status, body) = get_root(state_for(db)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User: John Doe\nUser: John Doe\n");
    }

    #[tokio::test]
    async fn seed_name_is_configurable() {
        let dir = tempdir().unwrap();
        let mut config = config_for(&dir.path().join("named.db"));
        config.service.seed_name = "Jane Doe".to_string();

        let db = initialize_store(&config).await.unwrap();

        let (_, body) = get_root(state_for(db)).await;
        assert_eq!(body, "User: Jane Doe\n");
    }

    #[tokio::test]
    async fn startup_fails_on_unopenable_path() {
        let config = config_for(std::path::Path::new(
            "/nonexistent-dir/definitely/missing.db",
        ));
        let result = initialize_store(&config).await;
        assert!(result.is_err(), "open against missing directory must fail");
    }
}
