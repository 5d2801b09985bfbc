// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credit tuple persistence in `attribution_customer_journey`.

use attrib_core::{AttribError, CreditTuple, Relation};
use rusqlite::params;
use tracing::info;

use super::{real_column, text_column};
use crate::database::{query_err, Database};

/// Upsert credit tuples keyed by `(conv_id, session_id)`.
///
/// A key that already exists has its credit overwritten, and a key repeated
/// within `credits` keeps its last value. Returns the number of tuples written.
pub async fn upsert_credits(db: &Database, credits: &[CreditTuple]) -> Result<usize, AttribError> {
    let relation = Relation::AttributionCustomerJourney;
    let credits = credits.to_vec();
    let written = db
        .connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(&format!(
                    "INSERT INTO {} (conv_id, session_id, ihc) VALUES (?1, ?2, ?3) \
                     ON CONFLICT(conv_id, session_id) DO UPDATE SET ihc = excluded.ihc",
                    relation.table_name()
                ))?;
                for c in &credits {
                    stmt.execute(params![c.conversion_id, c.session_id, c.credit])?;
                }
            }
            tx.commit()?;
            Ok(credits.len())
        })
        .await
        .map_err(query_err(relation))?;

    info!(rows = written, "upserted credit tuples");
    Ok(written)
}

/// Fetch every stored credit tuple, ordered by key.
pub async fn fetch_credits(db: &Database) -> Result<Vec<CreditTuple>, AttribError> {
    let relation = Relation::AttributionCustomerJourney;
    db.connection()
        .call(move |conn| -> Result<Vec<CreditTuple>, rusqlite::Error> {
            let sql = format!(
                "SELECT conv_id, session_id, ihc FROM {} ORDER BY conv_id, session_id",
                relation.table_name()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], |row| {
                Ok(CreditTuple {
                    conversion_id: text_column(row, 0)?,
                    session_id: text_column(row, 1)?,
                    credit: real_column(row, 2)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(query_err(relation))
}
