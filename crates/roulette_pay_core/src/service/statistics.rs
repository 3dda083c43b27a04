//! Per-member payment summary.
//!
//! Shares of members that were removed from the event are left out of the
//! per-member rows but still count toward the grand total.

use crate::model::event_group::EventGroup;
use crate::model::member::MemberId;
use std::collections::HashMap;

/// Totals for one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberStatistics {
    pub member_id: MemberId,
    pub name: String,
    /// Sum of this member's shares.
    pub total_paid: u64,
    /// Number of payments this member took part in.
    pub payment_count: u32,
}

/// Summary of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStatistics {
    /// One row per current member, in member order.
    pub members: Vec<MemberStatistics>,
    /// Members with a non-zero total, highest first; ties keep member order.
    pub ranking: Vec<MemberStatistics>,
    pub grand_total: u64,
    pub payment_count: usize,
}

pub fn summarize(event: &EventGroup) -> EventStatistics {
    let mut totals: HashMap<MemberId, (u64, u32)> = HashMap::new();
    for payment in &event.payments {
        for share in &payment.shares {
            let entry = totals.entry(share.member_id).or_insert((0, 0));
            entry.0 = entry.0.saturating_add(share.amount);
            entry.1 += 1;
        }
    }

    let members = event
        .members
        .iter()
        .map(|member| {
            let (total_paid, payment_count) = totals.get(&member.id).copied().unwrap_or((0, 0));
            MemberStatistics {
                member_id: member.id,
                name: member.name.clone(),
                total_paid,
                payment_count,
            }
        })
        .collect::<Vec<_>>();

    let mut ranking = members
        .iter()
        .filter(|row| row.total_paid > 0)
        .cloned()
        .collect::<Vec<_>>();
    ranking.sort_by(|left, right| right.total_paid.cmp(&left.total_paid));

    EventStatistics {
        members,
        ranking,
        grand_total: event.total_spent(),
        payment_count: event.payments.len(),
    }
}
