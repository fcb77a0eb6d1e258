//! The four-stage balance pipeline behind one call.

use std::collections::HashSet;

use splitledger_core::{DomainError, DomainResult, Entity};

use crate::builder::LedgerBuilder;
use crate::ledger::MemberIndex;
use crate::model::{Expense, Member, Settlement};
use crate::netting::NettingEngine;
use crate::projection::{BalanceProjector, BalanceReport};
use crate::settlement::{OverpaymentPolicy, SettlementApplier};

/// Runs ledger build → settlement → netting → projection.
///
/// Stateless: every call rebuilds the ledger from the given records.
#[derive(Debug, Default, Clone, Copy)]
pub struct BalanceEngine {
    policy: OverpaymentPolicy,
}

impl BalanceEngine {
    pub fn new(policy: OverpaymentPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> OverpaymentPolicy {
        self.policy
    }

    /// Compute the group report.
    ///
    /// Fails only on fixed-point overflow, or on overpayment under
    /// [`OverpaymentPolicy::Reject`].
    pub fn compute(
        &self,
        roster: &[Member],
        expenses: &[Expense],
        settlements: &[Settlement],
    ) -> DomainResult<BalanceReport> {
        let span = tracing::debug_span!(
            "balance_pipeline",
            members = roster.len(),
            expenses = expenses.len(),
            settlements = settlements.len(),
        );
        let _entered = span.enter();

        let roster = dedup_by_id(roster);
        let index = MemberIndex::new(roster.iter().map(|m| m.id));

        let state = LedgerBuilder.build(index, expenses)?;
        ensure_conserved(state.net_totals.sum(), "after ledger build")?;

        let state = SettlementApplier::new(self.policy).apply(state, settlements)?;
        ensure_conserved(state.net_totals.sum(), "after settlements")?;

        let ledger = NettingEngine.net(state.ledger)?;
        debug_assert!(NettingEngine::is_canonical(&ledger));

        Ok(BalanceProjector.project(&roster, &ledger, &state.net_totals))
    }
}

/// [`BalanceEngine::compute`] with the default (reverse-direction) policy.
pub fn compute_balances(
    roster: &[Member],
    expenses: &[Expense],
    settlements: &[Settlement],
) -> DomainResult<BalanceReport> {
    BalanceEngine::default().compute(roster, expenses, settlements)
}

/// Keep the first occurrence of each id, preserving order.
fn dedup_by_id<T>(records: &[T]) -> Vec<T>
where
    T: Entity + Clone,
{
    let mut seen = HashSet::with_capacity(records.len());
    let deduped: Vec<T> = records
        .iter()
        .filter(|r| seen.insert(r.id().clone()))
        .cloned()
        .collect();
    if deduped.len() != records.len() {
        tracing::debug!(
            dropped = records.len() - deduped.len(),
            "duplicate ids dropped"
        );
    }
    deduped
}

fn ensure_conserved(sum: i128, stage: &str) -> DomainResult<()> {
    if sum != 0 {
        return Err(DomainError::invariant(format!(
            "net totals sum to {sum} {stage}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use splitledger_core::{ExpenseId, MemberId, Money, SettlementId};
    use uuid::Uuid;

    use crate::model::Split;

    fn member(n: u128, name: &str) -> Member {
        Member::new(MemberId::from_uuid(Uuid::from_u128(n)), name)
    }

    #[test]
    fn duplicate_roster_entries_are_reported_once() {
        let a = member(1, "Ada");
        let b = member(2, "Bo");
        let roster = vec![a.clone(), b.clone(), Member::new(a.id, "Ada again")];

        let report = compute_balances(&roster, &[], &[]).unwrap();

        assert_eq!(report.members.len(), 2);
        assert_eq!(report.balances.len(), 2);
        assert_eq!(report.user_lookup_map[&a.id].name, "Ada");
    }

    #[test]
    fn empty_group_produces_empty_report() {
        let report = compute_balances(&[], &[], &[]).unwrap();
        assert!(report.members.is_empty());
        assert!(report.balances.is_empty());
        assert!(report.user_lookup_map.is_empty());
    }

    #[test]
    fn chained_debts_are_not_simplified_across_members() {
        // a pays for b, b pays for c: c owes b and b owes a, nothing is
        // rerouted from c to a.
        let (a, b, c) = (member(1, "a"), member(2, "b"), member(3, "c"));
        let expenses = vec![
            Expense {
                id: ExpenseId::new(),
                payer_id: a.id,
                amount: Money::from_minor(100),
                description: String::new(),
                occurred_at: Utc::now(),
                splits: vec![Split::new(b.id, Money::from_minor(100))],
            },
            Expense {
                id: ExpenseId::new(),
                payer_id: b.id,
                amount: Money::from_minor(100),
                description: String::new(),
                occurred_at: Utc::now(),
                splits: vec![Split::new(c.id, Money::from_minor(100))],
            },
        ];
        let roster = vec![a.clone(), b.clone(), c.clone()];

        let report = compute_balances(&roster, &expenses, &[]).unwrap();

        assert_eq!(report.balance_of(&b.id).unwrap().total_balance, Money::ZERO);
        assert_eq!(report.owed_between(&b.id, &a.id), Some(Money::from_minor(100)));
        assert_eq!(report.owed_between(&c.id, &b.id), Some(Money::from_minor(100)));
        assert_eq!(report.owed_between(&c.id, &a.id), Some(Money::ZERO));
    }

    #[test]
    fn reject_policy_surfaces_overpayment_from_compute() {
        let (a, b) = (member(1, "a"), member(2, "b"));
        let settlement = Settlement {
            id: SettlementId::new(),
            payer_id: b.id,
            receiver_id: a.id,
            amount: Money::from_minor(1),
            occurred_at: Utc::now(),
        };

        let err = BalanceEngine::new(OverpaymentPolicy::Reject)
            .compute(&[a, b], &[], &[settlement])
            .unwrap_err();
        assert!(matches!(err, DomainError::Overpayment { .. }));
    }
}
