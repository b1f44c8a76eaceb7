// SPDX-FileCopyrightText: 2026 Rollcall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP surface for the Rollcall service.
//!
//! One listing route serves every path: `GET /` (and, via the router
//! fallback, any other path) renders the `users` table as plain text, one
//! `User: <name>` line per row. A `/health` route exposes an unauthenticated
//! JSON health document. The database handle is injected through axum state
//! rather than captured globally.

pub mod handlers;
pub mod server;

pub use server::{AppState, HealthState, ServerConfig, build_router, start_server};
