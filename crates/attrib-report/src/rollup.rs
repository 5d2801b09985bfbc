// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-channel, per-day rollup of spend and attributed credit.

use std::collections::{BTreeMap, HashMap};

use attrib_core::{ChannelDayAggregate, Conversion, CreditTuple, Session, SessionCost};
use tracing::{debug, info};

/// Largest summed credit a channel/day group may carry.
pub const MAX_GROUP_CREDIT: f64 = 1.0;

#[derive(Default)]
struct Totals {
    cost: f64,
    credit: f64,
    credit_revenue: f64,
}

/// Roll sessions, costs, credits, and conversions up to one row per
/// `(channel_label, event_date)`.
///
/// Joins are left joins: `sessions ⟕ costs` on session id, then `⟕ credits`
/// on session id, then `⟕ conversions` on the credit's conversion id. A
/// session with several matches on the right contributes once per
/// combination, and absent values count as 0. Groups whose summed credit
/// exceeds [`MAX_GROUP_CREDIT`] are dropped; the comparison is exact. Output is sorted by channel,
/// then date.
pub fn aggregate(
    sessions: &[Session],
    costs: &[SessionCost],
    credits: &[CreditTuple],
    conversions: &[Conversion],
) -> Vec<ChannelDayAggregate> {
    let costs_by_session = index_by(costs, |c| c.session_id.as_str());
    let credits_by_session = index_by(credits, |c| c.session_id.as_str());
    let conversions_by_id = index_by(conversions, |c| c.conversion_id.as_str());

    let mut groups: BTreeMap<(&str, &str), Totals> = BTreeMap::new();

    for session in sessions {
        let totals = groups
            .entry((session.channel_label.as_str(), session.event_date.as_str()))
            .or_default();

        for cost in left(costs_by_session.get(session.session_id.as_str())) {
            let cost = cost.map_or(0.0, |c| c.cost);

            for credit in left(credits_by_session.get(session.session_id.as_str())) {
                let matches = credit.and_then(|c| conversions_by_id.get(c.conversion_id.as_str()));
                let credit = credit.map_or(0.0, |c| c.credit);

                for conversion in left(matches) {
                    totals.cost += cost;
                    totals.credit += credit;
                    totals.credit_revenue += credit * conversion.map_or(0.0, |c| c.revenue);
                }
            }
        }
    }

    let mut excluded = 0usize;
    let rows: Vec<_> = groups
        .into_iter()
        .filter(|((channel, date), totals)| {
            let keep = totals.credit <= MAX_GROUP_CREDIT;
            if !keep {
                excluded += 1;
                debug!(channel, date, credit = totals.credit, "dropping over-credited group");
            }
            keep
        })
        .map(|((channel, date), totals)| ChannelDayAggregate {
            channel_label: channel.to_string(),
            date: date.to_string(),
            total_cost: totals.cost,
            total_credit: totals.credit,
            total_credit_revenue: totals.credit_revenue,
        })
        .collect();

    info!(groups = rows.len(), excluded, "aggregated channel reporting");
    rows
}

fn index_by<'a, T>(rows: &'a [T], key: impl Fn(&'a T) -> &'a str) -> HashMap<&'a str, Vec<&'a T>> {
    let mut index: HashMap<&str, Vec<&T>> = HashMap::new();
    for row in rows {
        index.entry(key(row)).or_default().push(row);
    }
    index
}

/// Right side of a left join: every match, or a single `None`.
fn left<'a, T>(matches: Option<&'a Vec<&'a T>>) -> Vec<Option<&'a T>> {
    match matches {
        Some(rows) if !rows.is_empty() => rows.iter().copied().map(Some).collect(),
        _ => vec![None],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrib_test_utils::{conversion, cost, session};

    fn credit(conv: &str, sess: &str, value: f64) -> CreditTuple {
        CreditTuple::new(conv, sess, value)
    }

    #[test]
    fn single_credited_session() {
        let sessions = vec![session("S1", "U1", "2024-03-01", "09:00:00", "Paid")];
        let costs = vec![cost("S1", 10.0)];
        let credits = vec![credit("C1", "S1", 0.5)];
        let conversions = vec![conversion("C1", "U1", "2024-03-01", "10:00:00", 200.0)];

        assert_eq!(
            aggregate(&sessions, &costs, &credits, &conversions),
            vec![ChannelDayAggregate {
                channel_label: "Paid".into(),
                date: "2024-03-01".into(),
                total_cost: 10.0,
                total_credit: 0.5,
                total_credit_revenue: 100.0,
            }]
        );
    }

    #[test]
    fn uncredited_session_keeps_cost_with_zero_credit() {
        let sessions = vec![session("S1", "U1", "2024-03-01", "09:00:00", "Email")];
        let costs = vec![cost("S1", 3.0)];

        let rows = aggregate(&sessions, &costs, &[], &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_cost, 3.0);
        assert_eq!(rows[0].total_credit, 0.0);
        assert_eq!(rows[0].total_credit_revenue, 0.0);
    }

    #[test]
    fn session_without_cost_counts_zero_cost() {
        let sessions = vec![session("S1", "U1", "2024-03-01", "09:00:00", "Organic")];
        let credits = vec![credit("C1", "S1", 1.0)];
        let conversions = vec![conversion("C1", "U1", "2024-03-01", "10:00:00", 40.0)];

        let rows = aggregate(&sessions, &[], &credits, &conversions);
        assert_eq!(rows[0].total_cost, 0.0);
        assert_eq!(rows[0].total_credit_revenue, 40.0);
    }

    #[test]
    fn credit_for_unknown_conversion_has_no_revenue() {
        let sessions = vec![session("S1", "U1", "2024-03-01", "09:00:00", "Paid")];
        let credits = vec![credit("C404", "S1", 0.7)];

        let rows = aggregate(&sessions, &[], &credits, &[]);
        assert_eq!(rows[0].total_credit, 0.7);
        assert_eq!(rows[0].total_credit_revenue, 0.0);
    }

    #[test]
    fn group_over_one_is_excluded() {
        let sessions = vec![
            session("S1", "U1", "2024-03-01", "09:00:00", "Paid"),
            session("S2", "U2", "2024-03-01", "10:00:00", "Paid"),
        ];
        let credits = vec![credit("C1", "S1", 0.7), credit("C2", "S2", 0.6)];

        assert!(aggregate(&sessions, &[], &credits, &[]).is_empty());
    }

    #[test]
    fn group_at_exactly_one_is_kept() {
        let sessions = vec![
            session("S1", "U1", "2024-03-01", "09:00:00", "Paid"),
            session("S2", "U1", "2024-03-01", "10:00:00", "Paid"),
            session("S3", "U1", "2024-03-01", "11:00:00", "Paid"),
        ];
        let credits = vec![
            credit("C1", "S1", 0.5),
            credit("C1", "S2", 0.25),
            credit("C1", "S3", 0.25),
        ];

        let rows = aggregate(&sessions, &[], &credits, &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_credit, 1.0);
    }

    #[test]
    fn group_just_over_one_is_excluded() {
        let sessions = vec![
            session("S1", "U1", "2024-03-01", "09:00:00", "Paid"),
            session("S2", "U2", "2024-03-02", "09:00:00", "Paid"),
        ];
        let credits = vec![credit("C1", "S1", 1.0 + 5e-10), credit("C2", "S2", 1.0)];

        let rows = aggregate(&sessions, &[], &credits, &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "2024-03-02");
    }

    #[test]
    fn multiple_credits_fan_out_cost() {
        let sessions = vec![session("S1", "U1", "2024-03-01", "09:00:00", "Paid")];
        let costs = vec![cost("S1", 5.0)];
        let credits = vec![credit("C1", "S1", 0.25), credit("C2", "S1", 0.5)];
        let conversions = vec![
            conversion("C1", "U1", "2024-03-01", "10:00:00", 100.0),
            conversion("C2", "U1", "2024-03-01", "12:00:00", 20.0),
        ];

        let rows = aggregate(&sessions, &costs, &credits, &conversions);
        assert_eq!(rows[0].total_cost, 10.0);
        assert_eq!(rows[0].total_credit, 0.75);
        assert_eq!(rows[0].total_credit_revenue, 35.0);
    }

    #[test]
    fn output_is_sorted_by_channel_then_date() {
        let sessions = vec![
            session("S1", "U1", "2024-03-02", "09:00:00", "Paid"),
            session("S2", "U1", "2024-03-01", "09:00:00", "Paid"),
            session("S3", "U1", "2024-03-02", "09:00:00", "Email"),
        ];

        let keys: Vec<_> = aggregate(&sessions, &[], &[], &[])
            .into_iter()
            .map(|r| (r.channel_label, r.date))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Email".to_string(), "2024-03-02".to_string()),
                ("Paid".to_string(), "2024-03-01".to_string()),
                ("Paid".to_string(), "2024-03-02".to_string()),
            ]
        );
    }

    #[test]
    fn empty_inputs_yield_nothing() {
        assert!(aggregate(&[], &[], &[], &[]).is_empty());
    }
}
