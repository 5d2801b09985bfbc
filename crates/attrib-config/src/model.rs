// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the attrib pipeline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level attrib configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to the values
/// the pipeline was originally run with.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AttribConfig {
    /// Run-wide settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// SQLite store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// IHC scoring service settings.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Report export settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Run-wide configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database holding sessions, conversions, and costs.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    "challenge.db".to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// IHC attribution service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Endpoint of the compute-IHC API, without query string.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Attribution model variant, sent as the `conv_type_id` query parameter.
    #[serde(default = "default_conv_type_id")]
    pub conv_type_id: String,

    /// Journey records per request.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Inline API key. Takes precedence over `api_key_file`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// File whose trimmed contents are the API key.
    #[serde(default = "default_api_key_file")]
    pub api_key_file: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Where every successfully parsed response is written as a JSON array.
    #[serde(default = "default_audit_path")]
    pub audit_path: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            conv_type_id: default_conv_type_id(),
            batch_size: default_batch_size(),
            api_key: None,
            api_key_file: default_api_key_file(),
            timeout_secs: default_timeout_secs(),
            audit_path: default_audit_path(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.ihc-attribution.com/v1/compute_ihc".to_string()
}

fn default_conv_type_id() -> String {
    "ihc_new".to_string()
}

fn default_batch_size() -> usize {
    100
}

fn default_api_key_file() -> String {
    "api_key.txt".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_audit_path() -> String {
    "api_responses.json".to_string()
}

/// Report export configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Destination of the channel reporting CSV.
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
        }
    }
}

fn default_output_path() -> String {
    "channel_reporting.csv".to_string()
}
