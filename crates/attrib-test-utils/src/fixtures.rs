// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Small, hand-checkable input data sets.
//!
//! The sample store has three users over two days:
//!
//! | session | user | date       | time  | channel | cost |
//! |---------|------|------------|-------|---------|------|
//! | S1      | U1   | 2024-03-01 | 09:00 | Organic | 1.5  |
//! | S2      | U1   | 2024-03-01 | 10:00 | Paid    | 4.0  |
//! | S3      | U2   | 2024-03-01 | 08:00 | Email   | 2.0  |
//! | S4      | U2   | 2024-03-02 | 12:00 | Paid    | 3.0  |
//! | S5      | U3   | 2024-03-02 | 09:00 | Organic | none |
//!
//! C1 (U1, 2024-03-01 11:00, revenue 100) has journey S1, S2.
//! C2 (U2, 2024-03-01 09:30, revenue 50) has journey S3; S4 comes later.

use attrib_core::{Conversion, JourneyRecord, Session, SessionCost};
use chrono::{Duration, NaiveDate};

/// Build a session with all engagement flags off.
pub fn session(id: &str, user: &str, date: &str, time: &str, channel: &str) -> Session {
    Session {
        session_id: id.to_string(),
        user_id: user.to_string(),
        event_date: date.to_string(),
        event_time: time.to_string(),
        channel_label: channel.to_string(),
        holder_engagement: false,
        closer_engagement: false,
        impression_interaction: false,
    }
}

pub fn conversion(id: &str, user: &str, date: &str, time: &str, revenue: f64) -> Conversion {
    Conversion {
        conversion_id: id.to_string(),
        user_id: user.to_string(),
        conversion_date: date.to_string(),
        conversion_time: time.to_string(),
        revenue,
    }
}

pub fn cost(session_id: &str, cost: f64) -> SessionCost {
    SessionCost {
        session_id: session_id.to_string(),
        cost,
    }
}

pub fn sample_sessions() -> Vec<Session> {
    let mut s1 = session("S1", "U1", "2024-03-01", "09:00:00", "Organic");
    s1.impression_interaction = true;
    let mut s2 = session("S2", "U1", "2024-03-01", "10:00:00", "Paid");
    s2.holder_engagement = true;
    s2.closer_engagement = true;
    vec![
        s1,
        s2,
        session("S3", "U2", "2024-03-01", "08:00:00", "Email"),
        session("S4", "U2", "2024-03-02", "12:00:00", "Paid"),
        session("S5", "U3", "2024-03-02", "09:00:00", "Organic"),
    ]
}

pub fn sample_conversions() -> Vec<Conversion> {
    vec![
        conversion("C1", "U1", "2024-03-01", "11:00:00", 100.0),
        conversion("C2", "U2", "2024-03-01", "09:30:00", 50.0),
    ]
}

pub fn sample_costs() -> Vec<SessionCost> {
    vec![
        cost("S1", 1.5),
        cost("S2", 4.0),
        cost("S3", 2.0),
        cost("S4", 3.0),
    ]
}

/// `count` synthetic journey records, `S0..S{count-1}`, four touchpoints
/// per conversion with the fourth (or final) one as the last touch.
pub fn journey_records(count: usize) -> Vec<JourneyRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    (0..count)
        .map(|i| JourneyRecord {
            conversion_id: format!("C{}", i / 4),
            session_id: format!("S{i}"),
            timestamp: start + Duration::minutes(i as i64),
            channel_label: ["Organic", "Paid", "Email"][i % 3].to_string(),
            holder_engagement: i % 2 == 0,
            closer_engagement: false,
            impression_interaction: i % 5 == 0,
            is_last_touch: i % 4 == 3 || i + 1 == count,
        })
        .collect()
}
