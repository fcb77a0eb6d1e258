//! Stage 4: reshape the netted ledger into a per-member report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use splitledger_core::{MemberId, Money};

use crate::ledger::{NetTotals, PairwiseLedger};
use crate::model::Member;

/// One outgoing debt of a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owes {
    pub to: MemberId,
    pub amount: Money,
}

/// One incoming debt of a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwedBy {
    pub from: MemberId,
    pub amount: Money,
}

/// A member's position within the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberBalance {
    pub id: MemberId,
    /// Positive: the group owes this member. Negative: this member owes the group.
    pub total_balance: Money,
    pub owes: Vec<Owes>,
    pub owed_by: Vec<OwedBy>,
}

/// Output of the balance pipeline, ready for a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    pub members: Vec<Member>,
    pub balances: Vec<MemberBalance>,
    pub user_lookup_map: BTreeMap<MemberId, Member>,
}

impl BalanceReport {
    pub fn balance_of(&self, id: &MemberId) -> Option<&MemberBalance> {
        self.balances.iter().find(|b| &b.id == id)
    }

    /// What `from` owes `to` after netting (zero if nothing, `None` for strangers).
    pub fn owed_between(&self, from: &MemberId, to: &MemberId) -> Option<Money> {
        if !self.user_lookup_map.contains_key(to) {
            return None;
        }
        let balance = self.balance_of(from)?;
        Some(
            balance
                .owes
                .iter()
                .find(|o| &o.to == to)
                .map(|o| o.amount)
                .unwrap_or(Money::ZERO),
        )
    }
}

/// Pure projection: no arithmetic beyond reading cells.
#[derive(Debug, Default, Clone, Copy)]
pub struct BalanceProjector;

impl BalanceProjector {
    /// `roster` must be the members `ledger` was indexed over; balances follow
    /// roster order, debts follow member-id order.
    pub fn project(&self, roster: &[Member], ledger: &PairwiseLedger, net_totals: &NetTotals) -> BalanceReport {
        let index = ledger.index();
        let n = index.len();

        let balances = roster
            .iter()
            .filter_map(|member| {
                let m = index.position(&member.id)?;
                let owes = (0..n)
                    .filter(|&x| ledger.get(m, x).is_positive())
                    .map(|x| Owes {
                        to: index.id_at(x),
                        amount: ledger.get(m, x),
                    })
                    .collect();
                let owed_by = (0..n)
                    .filter(|&x| ledger.get(x, m).is_positive())
                    .map(|x| OwedBy {
                        from: index.id_at(x),
                        amount: ledger.get(x, m),
                    })
                    .collect();
                Some(MemberBalance {
                    id: member.id,
                    total_balance: net_totals.get(m),
                    owes,
                    owed_by,
                })
            })
            .collect();

        let user_lookup_map = roster.iter().map(|m| (m.id, m.clone())).collect();

        BalanceReport {
            members: roster.to_vec(),
            balances,
            user_lookup_map,
        }
    }
}
