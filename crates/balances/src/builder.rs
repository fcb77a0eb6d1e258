//! Stage 1: fold expense splits into the pairwise ledger.

use splitledger_core::DomainResult;

use crate::ledger::{LedgerState, MemberIndex};
use crate::model::Expense;

/// Builds a fresh [`LedgerState`] from a group's expenses.
#[derive(Debug, Default, Clone, Copy)]
pub struct LedgerBuilder;

impl LedgerBuilder {
    /// For every outstanding split, the split member owes the payer its amount.
    ///
    /// Splits of members outside `index` (e.g. deleted users) are dropped, as
    /// are all splits of an expense whose payer is outside `index`: recording
    /// only one side would break conservation.
    pub fn build(&self, index: MemberIndex, expenses: &[Expense]) -> DomainResult<LedgerState> {
        let mut state = LedgerState::zeroed(index);

        for expense in expenses {
            let Some(creditor) = state.ledger.index().position(&expense.payer_id) else {
                tracing::debug!(
                    expense_id = %expense.id,
                    payer_id = %expense.payer_id,
                    "skipping expense paid by non-member"
                );
                continue;
            };

            for split in &expense.splits {
                if !split.is_outstanding_for(expense.payer_id) {
                    continue;
                }
                let Some(debtor) = state.ledger.index().position(&split.member_id) else {
                    tracing::debug!(
                        expense_id = %expense.id,
                        member_id = %split.member_id,
                        "skipping split of non-member"
                    );
                    continue;
                };
                state.accrue(debtor, creditor, split.amount)?;
            }
        }

        Ok(state)
    }
}
