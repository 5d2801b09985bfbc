// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reads and loads for the source relations: sessions, conversions, costs.

use attrib_core::{AttribError, Conversion, Relation, Session, SessionCost};
use rusqlite::params;
use tracing::info;

use super::{flag_column, real_column, text_column};
use crate::database::{query_err, Database};

/// Fetch every session from `session_sources`.
pub async fn fetch_sessions(db: &Database) -> Result<Vec<Session>, AttribError> {
    let relation = Relation::SessionSources;
    let sessions = db
        .connection()
        .call(move |conn| -> Result<Vec<Session>, rusqlite::Error> {
            let sql = format!(
                "SELECT session_id, user_id, event_date, event_time, channel_name, \
                 holder_engagement, closer_engagement, impression_interaction FROM {}",
                relation.table_name()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], |row| {
                Ok(Session {
                    session_id: text_column(row, 0)?,
                    user_id: text_column(row, 1)?,
                    event_date: text_column(row, 2)?,
                    event_time: text_column(row, 3)?,
                    channel_label: text_column(row, 4)?,
                    holder_engagement: flag_column(row, 5)?,
                    closer_engagement: flag_column(row, 6)?,
                    impression_interaction: flag_column(row, 7)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(query_err(relation))?;

    info!(relation = %relation, rows = sessions.len(), "fetched records");
    Ok(sessions)
}

/// Fetch every conversion from `conversions`.
pub async fn fetch_conversions(db: &Database) -> Result<Vec<Conversion>, AttribError> {
    let relation = Relation::Conversions;
    let conversions = db
        .connection()
        .call(move |conn| -> Result<Vec<Conversion>, rusqlite::Error> {
            let sql = format!(
                "SELECT conv_id, user_id, conv_date, conv_time, revenue FROM {}",
                relation.table_name()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], |row| {
                Ok(Conversion {
                    conversion_id: text_column(row, 0)?,
                    user_id: text_column(row, 1)?,
                    conversion_date: text_column(row, 2)?,
                    conversion_time: text_column(row, 3)?,
                    revenue: real_column(row, 4)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(query_err(relation))?;

    info!(relation = %relation, rows = conversions.len(), "fetched records");
    Ok(conversions)
}

/// Fetch every cost row from `session_costs`.
pub async fn fetch_costs(db: &Database) -> Result<Vec<SessionCost>, AttribError> {
    let relation = Relation::SessionCosts;
    let costs = db
        .connection()
        .call(move |conn| -> Result<Vec<SessionCost>, rusqlite::Error> {
            let sql = format!("SELECT session_id, cost FROM {}", relation.table_name());
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], |row| {
                Ok(SessionCost {
                    session_id: text_column(row, 0)?,
                    cost: real_column(row, 1)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(query_err(relation))?;

    info!(relation = %relation, rows = costs.len(), "fetched records");
    Ok(costs)
}

/// Number of rows currently stored in `relation`.
pub async fn count_rows(db: &Database, relation: Relation) -> Result<i64, AttribError> {
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            let sql = format!("SELECT COUNT(*) FROM {}", relation.table_name());
            conn.query_row(&sql, [], |row| row.get(0))
        })
        .await
        .map_err(query_err(relation))
}

/// Load sessions, replacing any row with the same `session_id`.
pub async fn insert_sessions(db: &Database, sessions: &[Session]) -> Result<usize, AttribError> {
    let relation = Relation::SessionSources;
    let sessions = sessions.to_vec();
    db.connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(&format!(
                    "INSERT OR REPLACE INTO {} (session_id, user_id, event_date, event_time, \
                     channel_name, holder_engagement, closer_engagement, \
                     impression_interaction) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    relation.table_name()
                ))?;
                for s in &sessions {
                    stmt.execute(params![
                        s.session_id,
                        s.user_id,
                        s.event_date,
                        s.event_time,
                        s.channel_label,
                        s.holder_engagement,
                        s.closer_engagement,
                        s.impression_interaction,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(sessions.len())
        })
        .await
        .map_err(query_err(relation))
}

/// Load conversions, replacing any row with the same `conv_id`.
pub async fn insert_conversions(
    db: &Database,
    conversions: &[Conversion],
) -> Result<usize, AttribError> {
    let relation = Relation::Conversions;
    let conversions = conversions.to_vec();
    db.connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(&format!(
                    "INSERT OR REPLACE INTO {} (conv_id, user_id, conv_date, conv_time, revenue) \
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    relation.table_name()
                ))?;
                for c in &conversions {
                    stmt.execute(params![
                        c.conversion_id,
                        c.user_id,
                        c.conversion_date,
                        c.conversion_time,
                        c.revenue,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(conversions.len())
        })
        .await
        .map_err(query_err(relation))
}

/// Load session costs, replacing any row with the same `session_id`.
pub async fn insert_costs(db: &Database, costs: &[SessionCost]) -> Result<usize, AttribError> {
    let relation = Relation::SessionCosts;
    let costs = costs.to_vec();
    db.connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(&format!(
                    "INSERT OR REPLACE INTO {} (session_id, cost) VALUES (?1, ?2)",
                    relation.table_name()
                ))?;
                for c in &costs {
                    stmt.execute(params![c.session_id, c.cost])?;
                }
            }
            tx.commit()?;
            Ok(costs.len())
        })
        .await
        .map_err(query_err(relation))
}
