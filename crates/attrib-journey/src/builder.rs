// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pairs each conversion with the ordered sessions that led up to it.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use attrib_core::{AttribError, Conversion, JourneyRecord, Session};
use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::timestamp::parse_timestamp;

/// A user's sessions with parsed timestamps, ascending. Ties keep input order.
type Timeline<'a> = Vec<(NaiveDateTime, &'a Session)>;

/// Build customer journeys for every conversion, in conversion input order.
///
/// For each conversion, the user's sessions at or before the conversion
/// instant are emitted in ascending timestamp order; the final one carries
/// `is_last_touch = true`. A conversion without qualifying sessions emits
/// nothing.
///
/// A malformed date or time on a conversion, or on any session of a
/// converting user, aborts the build with [`AttribError::InvalidTimestamp`].
pub fn build_journeys(
    sessions: &[Session],
    conversions: &[Conversion],
) -> Result<Vec<JourneyRecord>, AttribError> {
    let mut by_user: HashMap<&str, Vec<&Session>> = HashMap::new();
    for session in sessions {
        by_user.entry(session.user_id.as_str()).or_default().push(session);
    }

    let mut timelines: HashMap<&str, Timeline<'_>> = HashMap::new();
    let mut journeys = Vec::new();

    for conversion in conversions {
        let converted_at = parse_timestamp(
            &conversion.conversion_date,
            &conversion.conversion_time,
            &format!("conversion {}", conversion.conversion_id),
        )?;

        let user = conversion.user_id.as_str();
        let timeline = match timelines.entry(user) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(user_timeline(
                by_user.get(user).map(Vec::as_slice).unwrap_or_default(),
                conversion,
            )?),
        };

        let touchpoints = timeline.partition_point(|(at, _)| *at <= converted_at);
        for (idx, (at, session)) in timeline[..touchpoints].iter().enumerate() {
            journeys.push(JourneyRecord {
                conversion_id: conversion.conversion_id.clone(),
                session_id: session.session_id.clone(),
                timestamp: *at,
                channel_label: session.channel_label.clone(),
                holder_engagement: session.holder_engagement,
                closer_engagement: session.closer_engagement,
                impression_interaction: session.impression_interaction,
                is_last_touch: idx + 1 == touchpoints,
            });
        }

        debug!(
            conversion_id = %conversion.conversion_id,
            touchpoints,
            "created journey"
        );
    }

    info!(
        conversions = conversions.len(),
        records = journeys.len(),
        "built customer journeys"
    );
    Ok(journeys)
}

fn user_timeline<'a>(
    sessions: &[&'a Session],
    conversion: &Conversion,
) -> Result<Timeline<'a>, AttribError> {
    let mut timeline = sessions
        .iter()
        .map(|session| {
            let at = parse_timestamp(
                &session.event_date,
                &session.event_time,
                &format!(
                    "session {} (journey of conversion {})",
                    session.session_id, conversion.conversion_id
                ),
            )?;
            Ok((at, *session))
        })
        .collect::<Result<Timeline<'a>, AttribError>>()?;
    timeline.sort_by_key(|(at, _)| *at);
    Ok(timeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str, user: &str, channel: &str, time: &str) -> Session {
        Session {
            session_id: id.to_string(),
            user_id: user.to_string(),
            event_date: "2024-03-01".to_string(),
            event_time: time.to_string(),
            channel_label: channel.to_string(),
            holder_engagement: false,
            closer_engagement: false,
            impression_interaction: false,
        }
    }

    fn conversion(id: &str, user: &str, time: &str) -> Conversion {
        Conversion {
            conversion_id: id.to_string(),
            user_id: user.to_string(),
            conversion_date: "2024-03-01".to_string(),
            conversion_time: time.to_string(),
            revenue: 100.0,
        }
    }

    fn keys(journeys: &[JourneyRecord]) -> Vec<(&str, &str, bool)> {
        journeys
            .iter()
            .map(|j| (j.conversion_id.as_str(), j.session_id.as_str(), j.is_last_touch))
            .collect()
    }

    #[test]
    fn two_session_journey_marks_last_touch() {
        let sessions = vec![
            session("S1", "U1", "Organic", "09:00:00"),
            session("S2", "U1", "Paid", "10:00:00"),
        ];
        let conversions = vec![conversion("C1", "U1", "11:00:00")];

        let journeys = build_journeys(&sessions, &conversions).unwrap();
        assert_eq!(keys(&journeys), vec![("C1", "S1", false), ("C1", "S2", true)]);
        assert_eq!(journeys[0].channel_label, "Organic");
        assert_eq!(journeys[1].channel_label, "Paid");
    }

    #[test]
    fn later_sessions_are_excluded() {
        let sessions = vec![
            session("S1", "U1", "Organic", "09:00:00"),
            session("S2", "U1", "Paid", "12:00:00"),
        ];
        let conversions = vec![conversion("C1", "U1", "11:00:00")];

        let journeys = build_journeys(&sessions, &conversions).unwrap();
        assert_eq!(keys(&journeys), vec![("C1", "S1", true)]);
    }

    #[test]
    fn session_at_conversion_instant_is_included() {
        let sessions = vec![session("S1", "U1", "Direct", "11:00:00")];
        let conversions = vec![conversion("C1", "U1", "11:00:00")];

        let journeys = build_journeys(&sessions, &conversions).unwrap();
        assert_eq!(keys(&journeys), vec![("C1", "S1", true)]);
    }

    #[test]
    fn unsorted_input_is_emitted_in_time_order() {
        let sessions = vec![
            session("S3", "U1", "Email", "10:30:00"),
            session("S1", "U1", "Organic", "08:00:00"),
            session("S2", "U1", "Paid", "09:15:00"),
        ];
        let conversions = vec![conversion("C1", "U1", "11:00:00")];

        let journeys = build_journeys(&sessions, &conversions).unwrap();
        assert_eq!(
            keys(&journeys),
            vec![("C1", "S1", false), ("C1", "S2", false), ("C1", "S3", true)]
        );
    }

    #[test]
    fn conversion_without_sessions_contributes_nothing() {
        let sessions = vec![session("S1", "U2", "Organic", "09:00:00")];
        let conversions = vec![conversion("C1", "U1", "11:00:00")];

        assert!(build_journeys(&sessions, &conversions).unwrap().is_empty());
    }

    #[test]
    fn shared_sessions_appear_in_each_conversion() {
        let sessions = vec![
            session("S1", "U1", "Organic", "09:00:00"),
            session("S2", "U1", "Paid", "13:00:00"),
        ];
        let conversions = vec![
            conversion("C1", "U1", "10:00:00"),
            conversion("C2", "U1", "14:00:00"),
        ];

        let journeys = build_journeys(&sessions, &conversions).unwrap();
        assert_eq!(
            keys(&journeys),
            vec![("C1", "S1", true), ("C2", "S1", false), ("C2", "S2", true)]
        );
    }

    #[test]
    fn output_follows_conversion_input_order() {
        let sessions = vec![
            session("S1", "U1", "Organic", "09:00:00"),
            session("S2", "U2", "Paid", "09:00:00"),
        ];
        let conversions = vec![
            conversion("C2", "U2", "10:00:00"),
            conversion("C1", "U1", "10:00:00"),
        ];

        let journeys = build_journeys(&sessions, &conversions).unwrap();
        assert_eq!(keys(&journeys), vec![("C2", "S2", true), ("C1", "S1", true)]);
    }

    #[test]
    fn flags_are_carried_through() {
        let mut s = session("S1", "U1", "Organic", "09:00:00");
        s.holder_engagement = true;
        s.impression_interaction = true;
        let journeys =
            build_journeys(&[s], &[conversion("C1", "U1", "10:00:00")]).unwrap();

        assert!(journeys[0].holder_engagement);
        assert!(!journeys[0].closer_engagement);
        assert!(journeys[0].impression_interaction);
    }

    #[test]
    fn malformed_conversion_time_fails_fast() {
        let sessions = vec![session("S1", "U1", "Organic", "09:00:00")];
        let conversions = vec![
            conversion("C1", "U1", "10:00:00"),
            conversion("C2", "U1", "quarter past"),
        ];

        let err = build_journeys(&sessions, &conversions).unwrap_err();
        match err {
            AttribError::InvalidTimestamp { record, .. } => assert_eq!(record, "conversion C2"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_session_of_converting_user_fails_fast() {
        let sessions = vec![
            session("S1", "U1", "Organic", "09:00:00"),
            session("S2", "U1", "Paid", "25:61:00"),
        ];
        let conversions = vec![conversion("C1", "U1", "10:00:00")];

        let err = build_journeys(&sessions, &conversions).unwrap_err();
        match err {
            AttribError::InvalidTimestamp { record, value } => {
                assert!(record.contains("session S2"), "record: {record}");
                assert!(record.contains("conversion C1"), "record: {record}");
                assert_eq!(value, "2024-03-01 25:61:00");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_session_of_non_converting_user_is_not_read() {
        let sessions = vec![
            session("S1", "U1", "Organic", "09:00:00"),
            session("S9", "U9", "Paid", "not a time"),
        ];
        let conversions = vec![conversion("C1", "U1", "10:00:00")];

        assert_eq!(build_journeys(&sessions, &conversions).unwrap().len(), 1);
    }
}
