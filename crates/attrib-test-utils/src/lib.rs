// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for attrib integration tests.
//!
//! Provides [`MockScorer`], a scripted [`attrib_core::ScoringService`],
//! [`TestStore`], a seeded temporary SQLite store, and small fixture sets.

pub mod fixtures;
pub mod harness;
pub mod mock_scorer;

pub use fixtures::{
    conversion, cost, journey_records, sample_conversions, sample_costs, sample_sessions, session,
};
pub use harness::TestStore;
pub use mock_scorer::{equal_split_response, MockScorer};
