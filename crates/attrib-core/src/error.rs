// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the attrib pipeline.

use thiserror::Error;

/// The primary error type shared by every attrib crate.
///
/// The variants mirror the pipeline's degradation policy: only
/// [`AttribError::Connection`] and [`AttribError::InvalidTimestamp`] stop a
/// run; everything else is logged at the component boundary and degrades to
/// an empty or partial result.
#[derive(Debug, Error)]
pub enum AttribError {
    /// Configuration errors (invalid TOML, bad values, unusable endpoint).
    #[error("configuration error: {0}")]
    Config(String),

    /// The store could not be opened or migrated.
    #[error("store connection error: {source}")]
    Connection {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A read or write against a known relation failed.
    #[error("query error on {relation}: {source}")]
    Query {
        relation: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A scoring request failed at the transport or HTTP-status level.
    #[error("network error: {message}")]
    Network {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A scoring response could not be parsed or signalled failure.
    #[error("malformed scoring response: {message}")]
    MalformedResponse { message: String },

    /// No scoring credential was found in config, environment, or key file.
    #[error("no scoring API key found (checked {checked})")]
    MissingCredential { checked: String },

    /// A date/time pair in the input data could not be parsed.
    #[error("invalid timestamp on {record}: `{value}`")]
    InvalidTimestamp { record: String, value: String },

    /// Filesystem errors while writing side artifacts.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AttribError {
    /// Returns true for errors that must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AttribError::Connection { .. } | AttribError::InvalidTimestamp { .. }
        )
    }
}
