// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end attribution run.
//!
//! Stages run in order over one explicit store handle: ingest, journey
//! construction, scoring, credit extraction and persistence, channel rollup,
//! and CSV export. Only a store connection failure or a malformed timestamp
//! stops the run; every other failure is logged where it happens and the run
//! continues with whatever data survived. The store is closed on every path
//! once it was opened.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use attrib_config::AttribConfig;
use attrib_core::{AttribError, JourneyRecord, Relation, ScoringService};
use attrib_ihc::{
    extract_credits, resolve_api_key, send_for_scoring, write_audit_file, IhcClient,
};
use attrib_journey::build_journeys;
use attrib_report::{aggregate, write_csv};
use attrib_storage::{
    fetch_channel_reporting, fetch_conversions, fetch_costs, fetch_credits, fetch_sessions,
    replace_channel_reporting, upsert_credits, Database,
};
use tracing::{info, warn};

/// What a run produced.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PipelineOutcome {
    /// Journey records built from the store.
    pub journeys: usize,
    /// False when no credential was available and scoring was skipped.
    pub scored: bool,
    /// Batches answered with a parseable body.
    pub batches_succeeded: usize,
    /// Zero-based indices of batches that failed.
    pub failed_batches: BTreeSet<usize>,
    /// Credit tuples extracted from successful responses.
    pub credits: usize,
    /// Rows in the stored channel report.
    pub report_rows: usize,
    /// Where the CSV landed, when it was written.
    pub report_path: Option<PathBuf>,
}

/// Run the full pipeline with the IHC HTTP client.
///
/// A missing credential, or one the HTTP client rejects, is not an error:
/// journeys are still built, then the run stops before scoring.
pub async fn run_pipeline(config: &AttribConfig) -> Result<PipelineOutcome, AttribError> {
    let client = match resolve_api_key(&config.scoring).await {
        Ok(key) => match IhcClient::new(&config.scoring, &key) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "scoring client unavailable, scoring disabled");
                None
            }
        },
        Err(e) => {
            warn!(error = %e, "scoring disabled");
            None
        }
    };
    run_pipeline_with(
        config,
        client.as_ref().map(|c| c as &dyn ScoringService),
    )
    .await
}

/// Run the full pipeline against any scoring backend. `None` skips scoring.
pub async fn run_pipeline_with(
    config: &AttribConfig,
    scorer: Option<&dyn ScoringService>,
) -> Result<PipelineOutcome, AttribError> {
    let db = Database::open_with_config(&config.storage).await?;
    let result = run_stages(&db, config, scorer).await;
    close_store(db, result).await
}

/// Build journeys from the store without scoring anything.
pub async fn collect_journeys(config: &AttribConfig) -> Result<Vec<JourneyRecord>, AttribError> {
    let db = Database::open_with_config(&config.storage).await?;
    let result = load_journeys(&db).await;
    close_store(db, result).await
}

/// Re-export the stored channel report to `output` without recomputing it.
pub async fn export_report(config: &AttribConfig, output: &Path) -> Result<usize, AttribError> {
    let db = Database::open_with_config(&config.storage).await?;
    let result = match fetch_channel_reporting(&db).await {
        Ok(rows) => write_csv(output, &rows),
        Err(e) => Err(e),
    };
    close_store(db, result).await
}

async fn close_store<T>(db: Database, result: Result<T, AttribError>) -> Result<T, AttribError> {
    match (db.close().await, result) {
        (Ok(()), result) => result,
        (Err(close_err), Ok(_)) => Err(close_err),
        (Err(close_err), Err(e)) => {
            warn!(error = %close_err, "failed to close store after error");
            Err(e)
        }
    }
}

async fn load_journeys(db: &Database) -> Result<Vec<JourneyRecord>, AttribError> {
    let sessions = or_empty(fetch_sessions(db).await, Relation::SessionSources);
    let conversions = or_empty(fetch_conversions(db).await, Relation::Conversions);
    build_journeys(&sessions, &conversions)
}

async fn run_stages(
    db: &Database,
    config: &AttribConfig,
    scorer: Option<&dyn ScoringService>,
) -> Result<PipelineOutcome, AttribError> {
    let sessions = or_empty(fetch_sessions(db).await, Relation::SessionSources);
    let conversions = or_empty(fetch_conversions(db).await, Relation::Conversions);
    let journeys = build_journeys(&sessions, &conversions)?;

    let mut outcome = PipelineOutcome {
        journeys: journeys.len(),
        ..PipelineOutcome::default()
    };

    let Some(scorer) = scorer else {
        info!(journeys = journeys.len(), "no scoring credential, stopping after journeys");
        return Ok(outcome);
    };
    outcome.scored = true;

    let report = send_for_scoring(scorer, &journeys, config.scoring.batch_size).await;
    if let Err(e) = write_audit_file(Path::new(&config.scoring.audit_path), &report.succeeded).await
    {
        warn!(error = %e, "failed to write scoring audit file");
    }
    outcome.batches_succeeded = report.succeeded.len();
    outcome.failed_batches = report.failed_batches;

    let credits = extract_credits(&report.succeeded);
    outcome.credits = credits.len();
    if let Err(e) = upsert_credits(db, &credits).await {
        warn!(error = %e, "failed to store credits");
    }

    let stored_credits = or_empty(fetch_credits(db).await, Relation::AttributionCustomerJourney);
    let costs = or_empty(fetch_costs(db).await, Relation::SessionCosts);
    let rows = aggregate(&sessions, &costs, &stored_credits, &conversions);
    if let Err(e) = replace_channel_reporting(db, &rows).await {
        warn!(error = %e, "failed to store channel reporting");
    }

    let stored = or_empty(fetch_channel_reporting(db).await, Relation::ChannelReporting);
    outcome.report_rows = stored.len();
    let output = PathBuf::from(&config.report.output_path);
    match write_csv(&output, &stored) {
        Ok(_) => outcome.report_path = Some(output),
        Err(e) => warn!(error = %e, "failed to export channel reporting"),
    }

    info!(
        journeys = outcome.journeys,
        batches = outcome.batches_succeeded,
        failed = outcome.failed_batches.len(),
        credits = outcome.credits,
        report_rows = outcome.report_rows,
        "attribution run complete"
    );
    Ok(outcome)
}

/// A failed read degrades to no rows.
fn or_empty<T>(result: Result<Vec<T>, AttribError>, relation: Relation) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(%relation, error = %e, "read failed, continuing with no rows");
        Vec::new()
    })
}
