// SPDX-FileCopyrightText: 2026 Rollcall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rollcall - a small SQLite-backed HTTP service that lists user rows.
//!
//! This is the binary entry point for the Rollcall service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;

/// Rollcall - a small SQLite-backed HTTP service that lists user rows.
#[derive(Parser, Debug)]
#[command(name = "rollcall", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Rollcall server.
    Serve,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match rollcall_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            rollcall_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    // Bare `rollcall` behaves like `rollcall serve`.
    match cli.command {
        Some(Commands::Serve) | None => {
            if let Err(e) = serve::run_serve(config).await {
                tracing::error!(error = %e, "fatal startup error");
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }
}
