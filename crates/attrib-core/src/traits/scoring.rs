// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scoring service trait for attribution backends (IHC API, test doubles).

use async_trait::async_trait;

use crate::error::AttribError;
use crate::types::{JourneyRecord, RawResponse};

/// A backend that assigns per-touchpoint credit to a batch of journeys.
///
/// Implementations send exactly one request per call and return the parsed
/// response body untouched. Business-level status inside the body is not
/// interpreted here; that is the credit extractor's job.
#[async_trait]
pub trait ScoringService: Send + Sync {
    /// Human-readable backend name used in log lines.
    fn name(&self) -> &str;

    /// Submits one batch of journey records for scoring.
    async fn score_batch(&self, batch: &[JourneyRecord]) -> Result<RawResponse, AttribError>;
}
