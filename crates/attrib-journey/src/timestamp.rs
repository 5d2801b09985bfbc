// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Combining separate date and time fields into one comparable instant.

use attrib_core::AttribError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted time layouts, tried in order.
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// Wire and display format for combined timestamps. Sub-second precision
/// is kept when present; whole seconds print without a fraction.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parse `date` and `time` into a [`NaiveDateTime`].
///
/// `record` names the row the values came from and is carried into the
/// error so a bad export can be traced back to its source.
pub fn parse_timestamp(date: &str, time: &str, record: &str) -> Result<NaiveDateTime, AttribError> {
    let invalid = || AttribError::InvalidTimestamp {
        record: record.to_string(),
        value: format!("{date} {time}"),
    };

    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| invalid())?;
    let time = TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(time.trim(), fmt).ok())
        .ok_or_else(invalid)?;

    Ok(date.and_time(time))
}
