// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scoring API key resolution.

use std::path::Path;

use attrib_config::model::ScoringConfig;
use attrib_core::AttribError;
use secrecy::SecretString;
use tracing::debug;

/// Resolve the scoring API key.
///
/// `scoring.api_key` (which `ATTRIB_SCORING_API_KEY` also sets) wins over
/// the trimmed contents of `scoring.api_key_file`. Blank values count as
/// absent. Returns [`AttribError::MissingCredential`] when neither yields a key.
pub async fn resolve_api_key(config: &ScoringConfig) -> Result<SecretString, AttribError> {
    let inline = config.api_key.as_deref().map(str::trim).unwrap_or_default();
    if !inline.is_empty() {
        debug!("using inline scoring API key");
        return Ok(SecretString::from(inline.to_string()));
    }

    if let Some(key) = read_key_file(Path::new(&config.api_key_file)).await {
        debug!(path = %config.api_key_file, "using scoring API key from file");
        return Ok(key);
    }

    Err(AttribError::MissingCredential {
        checked: format!("scoring.api_key, {}", config.api_key_file),
    })
}

async fn read_key_file(path: &Path) -> Option<SecretString> {
    let content = tokio::fs::read_to_string(path).await.ok()?;
    let key = content.trim();
    (!key.is_empty()).then(|| SecretString::from(key.to_string()))
}
