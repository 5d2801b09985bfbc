// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock scoring service for deterministic testing.
//!
//! `MockScorer` implements `ScoringService` with scripted responses and
//! records every batch it receives, so batching and failure handling can be
//! tested without an HTTP server.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use attrib_core::{AttribError, JourneyRecord, RawResponse, ScoringService};

/// A mock scorer that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty, the
/// batch is answered with [`equal_split_response`].
pub struct MockScorer {
    responses: Arc<Mutex<VecDeque<RawResponse>>>,
    failing: HashSet<usize>,
    received: Arc<Mutex<Vec<Vec<JourneyRecord>>>>,
}

impl MockScorer {
    /// Create a new mock scorer with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            failing: HashSet::new(),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock scorer pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<RawResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            ..Self::new()
        }
    }

    /// Make the batch with zero-based `index` fail with a network error.
    /// A failing batch does not consume a queued response.
    pub fn fail_batch(mut self, index: usize) -> Self {
        self.failing.insert(index);
        self
    }

    /// Sizes of every batch received, in order.
    pub async fn batch_sizes(&self) -> Vec<usize> {
        self.received.lock().await.iter().map(Vec::len).collect()
    }

    /// Session id of the first record in every batch, in order.
    pub async fn first_session_ids(&self) -> Vec<String> {
        self.received
            .lock()
            .await
            .iter()
            .filter_map(|batch| batch.first().map(|r| r.session_id.clone()))
            .collect()
    }
}

impl Default for MockScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScoringService for MockScorer {
    fn name(&self) -> &str {
        "mock-scorer"
    }

    async fn score_batch(&self, batch: &[JourneyRecord]) -> Result<RawResponse, AttribError> {
        let index = {
            let mut received = self.received.lock().await;
            received.push(batch.to_vec());
            received.len() - 1
        };

        if self.failing.contains(&index) {
            return Err(AttribError::Network {
                message: format!("mock failure on batch {index}"),
                source: None,
            });
        }

        let scripted = self.responses.lock().await.pop_front();
        Ok(scripted.unwrap_or_else(|| equal_split_response(batch)))
    }
}

/// A `statusCode: 200` body that splits each conversion's credit evenly
/// across its touchpoints in `batch`.
pub fn equal_split_response(batch: &[JourneyRecord]) -> RawResponse {
    let value: Vec<_> = batch
        .iter()
        .map(|record| {
            let touchpoints = batch
                .iter()
                .filter(|r| r.conversion_id == record.conversion_id)
                .count();
            serde_json::json!({
                "conversion_id": record.conversion_id,
                "session_id": record.session_id,
                "ihc": 1.0 / touchpoints as f64,
            })
        })
        .collect();
    serde_json::json!({ "statusCode": 200, "value": value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::journey_records;

    #[tokio::test]
    async fn scripted_responses_come_first() {
        let scorer = MockScorer::with_responses(vec![serde_json::json!({"statusCode": 500})]);
        let batch = journey_records(2);

        let first = scorer.score_batch(&batch).await.unwrap();
        let second = scorer.score_batch(&batch).await.unwrap();

        assert_eq!(first["statusCode"], 500);
        assert_eq!(second["statusCode"], 200);
        assert_eq!(scorer.batch_sizes().await, vec![2, 2]);
    }

    #[tokio::test]
    async fn failing_batch_errors_and_is_recorded() {
        let scorer = MockScorer::new().fail_batch(0);
        let err = scorer.score_batch(&journey_records(1)).await.unwrap_err();
        assert!(matches!(err, AttribError::Network { .. }));
        assert_eq!(scorer.batch_sizes().await, vec![1]);
    }

    #[test]
    fn equal_split_sums_to_one_per_conversion() {
        let response = equal_split_response(&journey_records(4));
        let total: f64 = response["value"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["ihc"].as_f64().unwrap())
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
