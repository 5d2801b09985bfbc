// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! IHC attribution scoring for the attrib pipeline.
//!
//! Resolves the API key, submits journeys in ordered batches through a
//! [`attrib_core::ScoringService`], records the raw responses to an audit
//! file, and extracts per-touchpoint credit.

pub mod audit;
pub mod batch;
pub mod client;
pub mod credential;
pub mod extract;
pub mod types;

pub use audit::write_audit_file;
pub use batch::{send_for_scoring, BatchReport};
pub use client::IhcClient;
pub use credential::resolve_api_key;
pub use extract::extract_credits;
