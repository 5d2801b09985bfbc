// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The derived `channel_reporting` relation.

use attrib_core::{AttribError, ChannelDayAggregate, Relation};
use rusqlite::params;
use tracing::info;

use super::{real_column, text_column};
use crate::database::{query_err, Database};

/// Replace the whole `channel_reporting` relation with `aggregates`.
///
/// Delete and reinsert happen in one transaction, so a failed write leaves
/// the previous report intact.
pub async fn replace_channel_reporting(
    db: &Database,
    aggregates: &[ChannelDayAggregate],
) -> Result<usize, AttribError> {
    let relation = Relation::ChannelReporting;
    let aggregates = aggregates.to_vec();
    let written = db
        .connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            let tx = conn.transaction()?;
            let table = relation.table_name();
            tx.execute(&format!("DELETE FROM {table}"), [])?;
            {
                let mut stmt = tx.prepare(&format!(
                    "INSERT INTO {table} (channel_name, date, cost, ihc, ihc_revenue) \
                     VALUES (?1, ?2, ?3, ?4, ?5) \
                     ON CONFLICT(channel_name, date) DO UPDATE SET \
                     cost = excluded.cost, ihc = excluded.ihc, ihc_revenue = excluded.ihc_revenue"
                ))?;
                for a in &aggregates {
                    stmt.execute(params![
                        a.channel_label,
                        a.date,
                        a.total_cost,
                        a.total_credit,
                        a.total_credit_revenue,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(aggregates.len())
        })
        .await
        .map_err(query_err(relation))?;

    info!(rows = written, "channel reporting replaced");
    Ok(written)
}

/// Fetch the stored report, ordered by channel then date.
pub async fn fetch_channel_reporting(db: &Database) -> Result<Vec<ChannelDayAggregate>, AttribError> {
    let relation = Relation::ChannelReporting;
    db.connection()
        .call(move |conn| -> Result<Vec<ChannelDayAggregate>, rusqlite::Error> {
            let sql = format!(
                "SELECT channel_name, date, cost, ihc, ihc_revenue FROM {} \
                 ORDER BY channel_name, date",
                relation.table_name()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], |row| {
                Ok(ChannelDayAggregate {
                    channel_label: text_column(row, 0)?,
                    date: text_column(row, 1)?,
                    total_cost: real_column(row, 2)?,
                    total_credit: real_column(row, 3)?,
                    total_credit_revenue: real_column(row, 4)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(query_err(relation))
}
