//! Stage 2: fold repayments into the pairwise ledger.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use splitledger_core::{DomainError, DomainResult, Money};

use crate::ledger::LedgerState;
use crate::model::Settlement;

/// What to do with a settlement larger than the debt it repays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverpaymentPolicy {
    /// Apply it anyway; netting turns the excess into debt owed back to the payer.
    #[default]
    ReverseDirection,
    /// Fail the whole computation with [`DomainError::Overpayment`].
    Reject,
}

impl OverpaymentPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverpaymentPolicy::ReverseDirection => "reverse",
            OverpaymentPolicy::Reject => "reject",
        }
    }
}

impl FromStr for OverpaymentPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reverse" | "reverse_direction" => Ok(OverpaymentPolicy::ReverseDirection),
            "reject" => Ok(OverpaymentPolicy::Reject),
            other => Err(DomainError::validation(format!(
                "unknown overpayment policy '{other}' (expected: reverse, reject)"
            ))),
        }
    }
}

/// Applies settlements on top of the ledger produced by
/// [`LedgerBuilder`](crate::LedgerBuilder).
///
/// No clamping happens here: a ledger entry may go negative and is resolved by
/// the [`NettingEngine`](crate::NettingEngine).
#[derive(Debug, Default, Clone, Copy)]
pub struct SettlementApplier {
    policy: OverpaymentPolicy,
}

impl SettlementApplier {
    pub fn new(policy: OverpaymentPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> OverpaymentPolicy {
        self.policy
    }

    /// Takes ownership of the state and returns it with every settlement applied.
    pub fn apply(&self, mut state: LedgerState, settlements: &[Settlement]) -> DomainResult<LedgerState> {
        for settlement in settlements {
            if settlement.payer_id == settlement.receiver_id {
                continue;
            }

            let index = state.ledger.index();
            let (Some(payer), Some(receiver)) = (
                index.position(&settlement.payer_id),
                index.position(&settlement.receiver_id),
            ) else {
                tracing::debug!(
                    settlement_id = %settlement.id,
                    payer_id = %settlement.payer_id,
                    receiver_id = %settlement.receiver_id,
                    "skipping settlement involving non-member"
                );
                continue;
            };

            // Outstanding debt of payer towards receiver, across both directions.
            let outstanding = state
                .ledger
                .get(payer, receiver)
                .checked_sub(state.ledger.get(receiver, payer))?;

            if settlement.amount > outstanding.max(Money::ZERO) {
                match self.policy {
                    OverpaymentPolicy::Reject => {
                        return Err(DomainError::Overpayment {
                            payer: settlement.payer_id,
                            receiver: settlement.receiver_id,
                            amount: settlement.amount,
                            outstanding: outstanding.max(Money::ZERO),
                        });
                    }
                    OverpaymentPolicy::ReverseDirection => {
                        tracing::debug!(
                            settlement_id = %settlement.id,
                            amount = %settlement.amount,
                            outstanding = %outstanding,
                            "settlement exceeds outstanding debt; excess reverses direction"
                        );
                    }
                }
            }

            state.accrue(payer, receiver, settlement.amount.checked_neg()?)?;
        }

        Ok(state)
    }
}
