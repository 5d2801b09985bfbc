// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel reporting: daily per-channel rollup and CSV export.

pub mod export;
pub mod rollup;

pub use export::{cost_per_order, return_on_ad_spend, write_csv, ReportRow};
pub use rollup::{aggregate, MAX_GROUP_CREDIT};
