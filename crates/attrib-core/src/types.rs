// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the journey, scoring, storage, and report crates.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A single touchpoint as ingested from `session_sources`.
///
/// Date and time are kept as the raw strings found in the store; the journey
/// builder combines them into one comparable instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub user_id: String,
    pub event_date: String,
    pub event_time: String,
    pub channel_label: String,
    pub holder_engagement: bool,
    pub closer_engagement: bool,
    pub impression_interaction: bool,
}

/// A conversion event as ingested from `conversions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub conversion_id: String,
    pub user_id: String,
    pub conversion_date: String,
    pub conversion_time: String,
    pub revenue: f64,
}

/// Spend attributed to a single session, from `session_costs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCost {
    pub session_id: String,
    pub cost: f64,
}

/// One (conversion, contributing session) pair of a customer journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyRecord {
    pub conversion_id: String,
    pub session_id: String,
    pub timestamp: NaiveDateTime,
    pub channel_label: String,
    pub holder_engagement: bool,
    pub closer_engagement: bool,
    pub impression_interaction: bool,
    /// True only on the chronologically last session of the conversion.
    pub is_last_touch: bool,
}

/// Fractional credit assigned to a touchpoint for a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditTuple {
    pub conversion_id: String,
    pub session_id: String,
    pub credit: f64,
}

impl CreditTuple {
    pub fn new(conversion_id: impl Into<String>, session_id: impl Into<String>, credit: f64) -> Self {
        Self {
            conversion_id: conversion_id.into(),
            session_id: session_id.into(),
            credit,
        }
    }
}

/// Per-channel, per-day rollup of cost and attributed credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelDayAggregate {
    pub channel_label: String,
    pub date: String,
    pub total_cost: f64,
    pub total_credit: f64,
    pub total_credit_revenue: f64,
}

/// A verbatim, successfully parsed scoring-service response body.
pub type RawResponse = serde_json::Value;

/// The relations the pipeline reads and writes.
///
/// Every SQL statement takes its table name from here, so no table name is
/// ever assembled from runtime input.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
pub enum Relation {
    SessionSources,
    Conversions,
    SessionCosts,
    AttributionCustomerJourney,
    ChannelReporting,
}

impl Relation {
    /// The SQLite table backing this relation.
    pub const fn table_name(self) -> &'static str {
        match self {
            Relation::SessionSources => "session_sources",
            Relation::Conversions => "conversions",
            Relation::SessionCosts => "session_costs",
            Relation::AttributionCustomerJourney => "attribution_customer_journey",
            Relation::ChannelReporting => "channel_reporting",
        }
    }
}
