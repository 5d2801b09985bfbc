// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel reporting CSV export with derived CPO and ROAS.

use std::path::Path;

use attrib_core::{AttribError, ChannelDayAggregate};
use serde::Serialize;
use tracing::info;

/// One exported line: the stored aggregate plus its ratios.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "channel_name")]
    pub channel_label: String,
    pub date: String,
    pub cost: f64,
    pub ihc: f64,
    pub ihc_revenue: f64,
    #[serde(rename = "CPO")]
    pub cpo: f64,
    #[serde(rename = "ROAS")]
    pub roas: f64,
}

impl From<&ChannelDayAggregate> for ReportRow {
    fn from(row: &ChannelDayAggregate) -> Self {
        Self {
            channel_label: row.channel_label.clone(),
            date: row.date.clone(),
            cost: row.total_cost,
            ihc: row.total_credit,
            ihc_revenue: row.total_credit_revenue,
            cpo: cost_per_order(row.total_cost, row.total_credit),
            roas: return_on_ad_spend(row.total_credit_revenue, row.total_cost),
        }
    }
}

/// Cost per attributed order; 0 when nothing was attributed.
pub fn cost_per_order(cost: f64, credit: f64) -> f64 {
    if credit == 0.0 { 0.0 } else { cost / credit }
}

/// Attributed revenue per unit of spend; 0 when nothing was spent.
pub fn return_on_ad_spend(credit_revenue: f64, cost: f64) -> f64 {
    if cost == 0.0 { 0.0 } else { credit_revenue / cost }
}

/// Write `rows` to `path` as CSV with header
/// `channel_name,date,cost,ihc,ihc_revenue,CPO,ROAS`, replacing any
/// existing file. Returns the number of data rows written.
pub fn write_csv(path: &Path, rows: &[ChannelDayAggregate]) -> Result<usize, AttribError> {
    let io_err = |e: csv::Error| AttribError::Io {
        path: path.display().to_string(),
        source: Box::new(e),
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(io_err)?;
    writer
        .write_record(["channel_name", "date", "cost", "ihc", "ihc_revenue", "CPO", "ROAS"])
        .map_err(io_err)?;
    for row in rows {
        writer.serialize(ReportRow::from(row)).map_err(io_err)?;
    }
    writer.flush().map_err(|e| AttribError::Io {
        path: path.display().to_string(),
        source: Box::new(e),
    })?;

    info!(path = %path.display(), rows = rows.len(), "exported channel reporting");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn aggregate(channel: &str, cost: f64, credit: f64, revenue: f64) -> ChannelDayAggregate {
        ChannelDayAggregate {
            channel_label: channel.into(),
            date: "2024-03-01".into(),
            total_cost: cost,
            total_credit: credit,
            total_credit_revenue: revenue,
        }
    }

    #[test]
    fn ratios_are_derived() {
        let row = ReportRow::from(&aggregate("Paid", 10.0, 0.5, 100.0));
        assert_eq!(row.cpo, 20.0);
        assert_eq!(row.roas, 10.0);
    }

    #[test]
    fn zero_credit_gives_zero_cpo() {
        let row = ReportRow::from(&aggregate("Paid", 10.0, 0.0, 0.0));
        assert_eq!(row.cpo, 0.0);
        assert_eq!(row.roas, 0.0);
    }

    #[test]
    fn zero_cost_gives_zero_roas() {
        let row = ReportRow::from(&aggregate("Organic", 0.0, 1.0, 80.0));
        assert_eq!(row.cpo, 0.0);
        assert_eq!(row.roas, 0.0);
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("channel_reporting.csv");
        let rows = vec![
            aggregate("Email", 2.0, 1.0, 50.0),
            aggregate("Paid", 4.0, 0.5, 50.0),
        ];

        assert_eq!(write_csv(&path, &rows).unwrap(), 2);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "channel_name,date,cost,ihc,ihc_revenue,CPO,ROAS");
        assert_eq!(lines[1], "Email,2024-03-01,2.0,1.0,50.0,2.0,25.0");
        assert_eq!(lines[2], "Paid,2024-03-01,4.0,0.5,50.0,8.0,12.5");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn empty_report_has_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("channel_reporting.csv");

        assert_eq!(write_csv(&path, &[]).unwrap(), 0);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap().trim_end(),
            "channel_name,date,cost,ihc,ihc_revenue,CPO,ROAS"
        );
    }

    #[test]
    fn channel_with_comma_is_quoted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("channel_reporting.csv");

        write_csv(&path, &[aggregate("Paid, Search", 1.0, 1.0, 1.0)]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Paid, Search\""), "got: {content}");
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("report.csv");

        let err = write_csv(&path, &[]).unwrap_err();
        assert!(matches!(err, AttribError::Io { .. }), "got: {err}");
    }
}
