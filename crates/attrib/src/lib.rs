// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orchestration for the `attrib` binary.

pub mod pipeline;

pub use pipeline::{collect_journeys, export_report, run_pipeline, run_pipeline_with, PipelineOutcome};
