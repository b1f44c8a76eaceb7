// SPDX-FileCopyrightText: 2026 Rollcall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical domain types shared across crate boundaries.

/// One record in the `users` table.
///
/// `id` is assigned by SQLite (`INTEGER PRIMARY KEY AUTOINCREMENT`) and is
/// the only uniqueness guarantee; names are free text and may repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Storage-assigned identifier, unique and monotonically increasing.
    pub id: i64,
    /// Display name.
    pub name: String,
}
