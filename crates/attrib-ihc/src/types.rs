// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the IHC compute endpoint.

use attrib_core::JourneyRecord;
use attrib_journey::TIMESTAMP_FORMAT;
use serde::{Deserialize, Serialize};

/// Request body for `POST /compute_ihc`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringRequest {
    pub customer_journeys: Vec<CustomerJourney>,
}

impl ScoringRequest {
    pub fn from_records(records: &[JourneyRecord]) -> Self {
        Self {
            customer_journeys: records.iter().map(CustomerJourney::from).collect(),
        }
    }
}

/// One touchpoint as the service expects it. Flags travel as 0/1 integers
/// and `conversion` marks the last touch of the journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerJourney {
    pub conversion_id: String,
    pub session_id: String,
    pub timestamp: String,
    pub channel_label: String,
    pub holder_engagement: u8,
    pub closer_engagement: u8,
    pub conversion: u8,
    pub impression_interaction: u8,
}

impl From<&JourneyRecord> for CustomerJourney {
    fn from(record: &JourneyRecord) -> Self {
        Self {
            conversion_id: record.conversion_id.clone(),
            session_id: record.session_id.clone(),
            timestamp: record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            channel_label: record.channel_label.clone(),
            holder_engagement: u8::from(record.holder_engagement),
            closer_engagement: u8::from(record.closer_engagement),
            conversion: u8::from(record.is_last_touch),
            impression_interaction: u8::from(record.impression_interaction),
        }
    }
}
