// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw response audit file.

use std::path::Path;

use attrib_core::{AttribError, RawResponse};
use tracing::info;

/// Write every response verbatim to `path` as a pretty-printed JSON array,
/// replacing any previous file.
pub async fn write_audit_file(path: &Path, responses: &[RawResponse]) -> Result<(), AttribError> {
    let io_err = |e: Box<dyn std::error::Error + Send + Sync>| AttribError::Io {
        path: path.display().to_string(),
        source: e,
    };

    let json = serde_json::to_string_pretty(responses).map_err(|e| io_err(Box::new(e)))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| io_err(Box::new(e)))?;

    info!(path = %path.display(), responses = responses.len(), "wrote scoring audit file");
    Ok(())
}
