//! Integrity checks run before records enter the pipeline.

use std::collections::HashSet;

use splitledger_core::{DomainError, DomainResult};

use crate::model::{Expense, Settlement};

/// Reject records that would silently produce a wrong ledger.
///
/// - amounts (expense, split, settlement) must be non-negative
/// - a member appears at most once in an expense's splits
pub fn validate_records(expenses: &[Expense], settlements: &[Settlement]) -> DomainResult<()> {
    for expense in expenses {
        if expense.amount.is_negative() {
            return Err(DomainError::data_integrity(format!(
                "expense {} has negative amount {}",
                expense.id, expense.amount
            )));
        }

        let mut seen = HashSet::with_capacity(expense.splits.len());
        for split in &expense.splits {
            if split.amount.is_negative() {
                return Err(DomainError::data_integrity(format!(
                    "expense {} has negative split {} for member {}",
                    expense.id, split.amount, split.member_id
                )));
            }
            if !seen.insert(split.member_id) {
                return Err(DomainError::data_integrity(format!(
                    "expense {} splits member {} more than once",
                    expense.id, split.member_id
                )));
            }
        }
    }

    for settlement in settlements {
        if settlement.amount.is_negative() {
            return Err(DomainError::data_integrity(format!(
                "settlement {} has negative amount {}",
                settlement.id, settlement.amount
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use splitledger_core::{ExpenseId, MemberId, Money, SettlementId};

    use crate::model::Split;

    fn expense(splits: Vec<Split>) -> Expense {
        Expense {
            id: ExpenseId::new(),
            payer_id: MemberId::new(),
            amount: Money::from_minor(1_000),
            description: "dinner".to_string(),
            occurred_at: Utc::now(),
            splits,
        }
    }

    #[test]
    fn accepts_well_formed_records() {
        let m = MemberId::new();
        let expenses = vec![expense(vec![Split::new(m, Money::from_minor(500))])];
        assert!(validate_records(&expenses, &[]).is_ok());
    }

    #[test]
    fn rejects_negative_split() {
        let expenses = vec![expense(vec![Split::new(MemberId::new(), Money::from_minor(-1))])];
        let err = validate_records(&expenses, &[]).unwrap_err();
        assert!(matches!(err, DomainError::DataIntegrity(msg) if msg.contains("negative split")));
    }

    #[test]
    fn rejects_duplicate_split_member() {
        let m = MemberId::new();
        let expenses = vec![expense(vec![
            Split::new(m, Money::from_minor(100)),
            Split::new(m, Money::from_minor(100)),
        ])];
        let err = validate_records(&expenses, &[]).unwrap_err();
        assert!(matches!(err, DomainError::DataIntegrity(msg) if msg.contains("more than once")));
    }

    #[test]
    fn rejects_negative_settlement() {
        let settlement = Settlement {
            id: SettlementId::new(),
            payer_id: MemberId::new(),
            receiver_id: MemberId::new(),
            amount: Money::from_minor(-300),
            occurred_at: Utc::now(),
        };
        let err = validate_records(&[], &[settlement]).unwrap_err();
        assert!(matches!(err, DomainError::DataIntegrity(_)));
    }
}
