// SPDX-FileCopyrightText: 2026 Rollcall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared error and domain types for the Rollcall service.

pub mod error;
pub mod types;

pub use error::RollcallError;
pub use types::User;
