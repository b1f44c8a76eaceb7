// SPDX-FileCopyrightText: 2026 Rollcall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use rollcall_core::RollcallError;
use rollcall_storage::Database;

use crate::handlers;

/// Health state for the /health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Shared state for axum request handlers.
///
/// Carries the single process-wide database handle explicitly, so handlers
/// receive it via `State` extraction instead of closure capture.
#[derive(Clone)]
pub struct AppState {
    /// The single shared database handle.
    pub db: Arc<Database>,
    /// Health state for the /health endpoint.
    pub health: HealthState,
}

/// Server configuration (mirrors `ServerConfig` from rollcall-config to
/// avoid a dependency on the config crate from this crate).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the application router.
///
/// `/` and the fallback serve the same user listing, so there is no routing
/// discrimination: every path outside `/health` renders the listing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_users))
        .route("/health", get(handlers::get_health))
        .fallback(handlers::list_users)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind the listener and serve until the process is killed.
///
/// A bind failure is fatal to the caller; once serving, per-request errors
/// are handled inside the handlers and never tear the server down.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), RollcallError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener =
        tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| RollcallError::Server {
                message: format!("failed to bind to {addr}: {e}"),
                source: Some(Box::new(e)),
            })?;

    tracing::info!("server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| RollcallError::Server {
            message: format!("server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tempfile::tempdir;
    use tower::ServiceExt;

    use rollcall_storage::queries;

    async fn test_state() -> (AppState, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("gateway.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        let state = AppState {
            db: Arc::new(db),
            health: HealthState {
                start_time: std::time::Instant::now(),
            },
        };
        (state, dir)
    }

    async fn get_body(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn root_on_empty_store_returns_empty_body() {
        let (state, _dir) = test_state().await;
        let router = build_router(state);

        let (status, body) = get_body(router, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "");
    }

    #[tokio::test]
    async fn root_lists_one_line_per_row() {
        let (state, _dir) = test_state().await;
        queries::users::insert_user(&state.db, "John Doe")
            .await
            .unwrap();
        queries::users::insert_user(&state.db, "Jane Doe")
            .await
            .unwrap();
        let router = build_router(state);

        let (status, body) = get_body(router, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User: John Doe\nUser: Jane Doe\n");
    }

    #[tokio::test]
    async fn any_path_serves_the_listing() {
        let (state, _dir) = test_state().await;
        queries::users::insert_user(&state.db, "John Doe")
            .await
            .unwrap();
        let router = build_router(state);

        let (status, body) = get_body(router.clone(), "/anything/at/all").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User: John Doe\n");

        let (status, body) = get_body(router, "/users").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User: John Doe\n");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (state, _dir) = test_state().await;
        let router = build_router(state);

        let (status, body) = get_body(router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn query_failure_returns_500_and_server_survives() {
        let (state, _dir) = test_state().await;
        queries::users::insert_user(&state.db, "John Doe")
            .await
            .unwrap();

        // Break the listing query out from under the handler.
        state
            .db
            .connection()
            .call(|conn| {
                conn.execute_batch("DROP TABLE users;")?;
                Ok(())
            })
            .await
            .unwrap();

        let router = build_router(state.clone());
        let (status, _body) = get_body(router.clone(), "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        // The router still answers subsequent requests.
        state
            .db
            .connection()
            .call(|conn| {
                conn.execute_batch("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT);")?;
                Ok(())
            })
            .await
            .unwrap();
        let (status, body) = get_body(router, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "");
    }
}
