// SPDX-FileCopyrightText: 2026 Rollcall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Handles the plain-text user listing (every path) and GET /health.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use rollcall_storage::queries;

use crate::server::AppState;

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
}

/// User listing handler, mounted at `/` and as the router fallback.
///
/// Queries every row of the `users` table and renders one `User: <name>`
/// line per row in storage-engine return order. A query failure yields a 500
/// for this request only; the process stays up and later requests are
/// unaffected.
pub async fn list_users(State(state): State<AppState>) -> Response {
    match queries::users::list_users(&state.db).await {
        Ok(users) => {
            let mut body = String::new();
            for user in &users {
                body.push_str("User: ");
                body.push_str(&user.name);
                body.push('\n');
            }
            body.into_response()
        }
        Err(e) => {
            error!(error = %e, "user listing query failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error\n").into_response()
        }
    }
}

/// GET /health
///
/// Probes the store with a trivial query and reports status, version, and
/// uptime. An unreachable store reports `unhealthy` with a 500.
pub async fn get_health(State(state): State<AppState>) -> Response {
    let uptime_secs = state.health.start_time.elapsed().as_secs();

    match state.db.ping().await {
        Ok(()) => Json(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_secs,
        })
        .into_response(),
        Err(e) => {
            error!(error = %e, "health probe failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    uptime_secs,
                }),
            )
                .into_response()
        }
    }
}
