// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pulls per-touchpoint credit out of raw scoring responses.

use attrib_core::{CreditTuple, RawResponse};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Business status the service reports for a fully scored batch.
const STATUS_OK: i64 = 200;

/// Flatten the `value` arrays of every successful response into credit tuples.
///
/// Responses whose `statusCode` is not 200 are skipped. Entries without a
/// usable `conversion_id` or `session_id` are skipped with a warning; a
/// missing or null `ihc` reads as 0.0. Order follows the input and
/// duplicates are kept.
pub fn extract_credits(responses: &[RawResponse]) -> Vec<CreditTuple> {
    let mut credits = Vec::new();

    for (index, response) in responses.iter().enumerate() {
        let status = response.get("statusCode").and_then(Value::as_i64);
        if status != Some(STATUS_OK) {
            debug!(response = index, status = ?status, "skipping unsuccessful response");
            continue;
        }

        let Some(entries) = response.get("value").and_then(Value::as_array) else {
            warn!(response = index, "successful response has no value array");
            continue;
        };

        for entry in entries {
            let (Some(conversion_id), Some(session_id)) =
                (id_field(entry, "conversion_id"), id_field(entry, "session_id"))
            else {
                warn!(response = index, entry = %entry, "credit entry missing identifier, skipping");
                continue;
            };
            let credit = entry.get("ihc").and_then(Value::as_f64).unwrap_or(0.0);
            credits.push(CreditTuple::new(conversion_id, session_id, credit));
        }
    }

    info!(responses = responses.len(), credits = credits.len(), "extracted credits");
    credits
}

/// Identifiers arrive as strings or bare numbers.
fn id_field(entry: &Value, key: &str) -> Option<String> {
    match entry.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
