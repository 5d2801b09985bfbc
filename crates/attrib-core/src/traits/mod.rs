// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service trait definitions.
//!
//! Traits use `#[async_trait]` so implementations can be held as trait objects.

pub mod scoring;

pub use scoring::ScoringService;
