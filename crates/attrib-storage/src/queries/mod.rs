// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed read/write operations, one module per group of relations.
//!
//! Source relations are often exported by other tools, so column values are
//! coerced on read: ids become strings, flags become `bool`, and numeric
//! NULLs become zero. Domain types never see a NULL.

pub mod credits;
pub mod reporting;
pub mod sources;

use rusqlite::types::ValueRef;
use rusqlite::Row;

/// Read a column as a string whatever its storage class.
pub(crate) fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
    })
}

/// Read a 0/1-style flag column as `bool`. NULL reads as `false`.
pub(crate) fn flag_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<bool> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => false,
        ValueRef::Integer(i) => i != 0,
        ValueRef::Real(f) => f != 0.0,
        ValueRef::Text(t) | ValueRef::Blob(t) => {
            let s = String::from_utf8_lossy(t);
            matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
        }
    })
}

/// Read a numeric column as `f64`. NULL and unparseable text read as `0.0`.
pub(crate) fn real_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<f64> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null | ValueRef::Blob(_) => 0.0,
        ValueRef::Integer(i) => i as f64,
        ValueRef::Real(f) => f,
        ValueRef::Text(t) => String::from_utf8_lossy(t).trim().parse().unwrap_or(0.0),
    })
}
