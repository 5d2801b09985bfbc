// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the attrib conversion-attribution pipeline.
//!
//! This crate provides the error taxonomy, the domain types that flow between
//! pipeline stages, and the [`ScoringService`] seam implemented by the IHC
//! client and by test doubles.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AttribError;
pub use traits::ScoringService;
pub use types::{
    ChannelDayAggregate, Conversion, CreditTuple, JourneyRecord, RawResponse, Relation, Session,
    SessionCost,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn attrib_error_has_all_variants() {
        let _config = AttribError::Config("test".into());
        let _connection = AttribError::Connection {
            source: Box::new(std::io::Error::other("test")),
        };
        let _query = AttribError::Query {
            relation: Relation::Conversions.to_string(),
            source: Box::new(std::io::Error::other("test")),
        };
        let _network = AttribError::Network {
            message: "test".into(),
            source: None,
        };
        let _malformed = AttribError::MalformedResponse {
            message: "test".into(),
        };
        let _missing = AttribError::MissingCredential {
            checked: "api_key.txt".into(),
        };
        let _timestamp = AttribError::InvalidTimestamp {
            record: "conversion C1".into(),
            value: "2024-13-01 10:00".into(),
        };
        let _io = AttribError::Io {
            path: "out.csv".into(),
            source: Box::new(std::io::Error::other("test")),
        };
        let _internal = AttribError::Internal("test".into());
    }

    #[test]
    fn only_connection_and_timestamp_errors_are_fatal() {
        let connection = AttribError::Connection {
            source: Box::new(std::io::Error::other("down")),
        };
        let timestamp = AttribError::InvalidTimestamp {
            record: "session S1".into(),
            value: "yesterday".into(),
        };
        let network = AttribError::Network {
            message: "timeout".into(),
            source: None,
        };
        let query = AttribError::Query {
            relation: "session_costs".into(),
            source: Box::new(std::io::Error::other("no such table")),
        };

        assert!(connection.is_fatal());
        assert!(timestamp.is_fatal());
        assert!(!network.is_fatal());
        assert!(!query.is_fatal());
    }

    #[test]
    fn relation_display_matches_table_name() {
        use std::str::FromStr;

        assert_eq!(Relation::iter().count(), 5);
        for relation in Relation::iter() {
            let s = relation.to_string();
            assert_eq!(s, relation.table_name());
            assert_eq!(Relation::from_str(&s).expect("should parse back"), relation);
        }
    }

    #[test]
    fn unknown_relation_name_is_rejected() {
        use std::str::FromStr;
        assert!(Relation::from_str("users; DROP TABLE conversions").is_err());
    }

    #[test]
    fn credit_tuple_new_sets_fields() {
        let tuple = CreditTuple::new("C1", "S2", 0.7);
        assert_eq!(tuple.conversion_id, "C1");
        assert_eq!(tuple.session_id, "S2");
        assert!((tuple.credit - 0.7).abs() < 1e-12);
    }
}
