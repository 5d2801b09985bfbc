// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Customer journey construction.
//!
//! Turns raw sessions and conversions into a flat, deterministic list of
//! [`attrib_core::JourneyRecord`]s ready to be submitted for scoring.

pub mod builder;
pub mod timestamp;

pub use builder::build_journeys;
pub use timestamp::{parse_timestamp, TIMESTAMP_FORMAT};
