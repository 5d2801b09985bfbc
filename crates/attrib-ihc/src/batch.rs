// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sequential batch submission to a [`ScoringService`].

use std::collections::BTreeSet;

use attrib_core::{JourneyRecord, RawResponse, ScoringService};
use tracing::{info, warn};

/// Outcome of submitting every batch.
///
/// A batch either contributes one entry to `succeeded` or its zero-based
/// index to `failed_batches`, never both.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<RawResponse>,
    pub failed_batches: BTreeSet<usize>,
}

impl BatchReport {
    /// Total batches attempted.
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed_batches.len()
    }
}

/// Split `journeys` into consecutive batches of `batch_size` and submit them
/// one after another, in order.
///
/// Failures are logged and recorded per batch; the loop always runs to the
/// end. A `batch_size` of zero is treated as one.
pub async fn send_for_scoring(
    service: &dyn ScoringService,
    journeys: &[JourneyRecord],
    batch_size: usize,
) -> BatchReport {
    let mut report = BatchReport::default();

    for (index, batch) in journeys.chunks(batch_size.max(1)).enumerate() {
        match service.score_batch(batch).await {
            Ok(response) => {
                info!(
                    service = service.name(),
                    batch = index,
                    records = batch.len(),
                    "batch scored"
                );
                report.succeeded.push(response);
            }
            Err(e) => {
                warn!(
                    service = service.name(),
                    batch = index,
                    records = batch.len(),
                    error = %e,
                    "batch failed, dropping"
                );
                report.failed_batches.insert(index);
            }
        }
    }

    info!(
        sent = report.succeeded.len(),
        failed = report.failed_batches.len(),
        "scoring finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrib_test_utils::{journey_records, MockScorer};

    #[tokio::test]
    async fn splits_into_ordered_batches() {
        let scorer = MockScorer::new();
        let journeys = journey_records(250);

        let report = send_for_scoring(&scorer, &journeys, 100).await;

        assert_eq!(scorer.batch_sizes().await, vec![100, 100, 50]);
        assert_eq!(report.succeeded.len(), 3);
        assert!(report.failed_batches.is_empty());

        let first_ids = scorer.first_session_ids().await;
        assert_eq!(first_ids, vec!["S0", "S100", "S200"]);
    }

    #[tokio::test]
    async fn exact_multiple_has_no_trailing_batch() {
        let scorer = MockScorer::new();
        send_for_scoring(&scorer, &journey_records(200), 100).await;
        assert_eq!(scorer.batch_sizes().await, vec![100, 100]);
    }

    #[tokio::test]
    async fn empty_input_sends_nothing() {
        let scorer = MockScorer::new();
        let report = send_for_scoring(&scorer, &[], 100).await;
        assert_eq!(report.attempted(), 0);
        assert!(scorer.batch_sizes().await.is_empty());
    }

    #[tokio::test]
    async fn failed_batch_is_recorded_and_loop_continues() {
        let scorer = MockScorer::new().fail_batch(1);
        let report = send_for_scoring(&scorer, &journey_records(250), 100).await;

        assert_eq!(scorer.batch_sizes().await, vec![100, 100, 50]);
        assert_eq!(report.succeeded.len(), 2);
        assert_eq!(report.failed_batches, BTreeSet::from([1]));
        assert_eq!(report.attempted(), 3);
    }

    #[tokio::test]
    async fn zero_batch_size_sends_singletons() {
        let scorer = MockScorer::new();
        send_for_scoring(&scorer, &journey_records(3), 0).await;
        assert_eq!(scorer.batch_sizes().await, vec![1, 1, 1]);
    }
}
