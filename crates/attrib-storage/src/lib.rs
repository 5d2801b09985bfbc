// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the attrib pipeline.
//!
//! Provides a migrated store handle with a single-writer concurrency model via
//! `tokio-rusqlite`, and typed operations over the five known relations. Table
//! names always come from [`attrib_core::Relation`].

pub mod database;
pub mod migrations;
pub mod queries;

pub use database::Database;
pub use queries::credits::{fetch_credits, upsert_credits};
pub use queries::reporting::{fetch_channel_reporting, replace_channel_reporting};
pub use queries::sources::{
    count_rows, fetch_conversions, fetch_costs, fetch_sessions, insert_conversions, insert_costs,
    insert_sessions,
};
