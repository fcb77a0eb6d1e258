//! Stage 3: collapse each pair's opposing debts into one direction.

use splitledger_core::{DomainResult, Money};

use crate::ledger::PairwiseLedger;

/// Canonicalizes a [`PairwiseLedger`].
///
/// After [`net`](NettingEngine::net), for every pair at most one direction is
/// non-zero and that value is strictly positive. Netting preserves each pair's
/// difference, so per-member net positions are unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct NettingEngine;

impl NettingEngine {
    pub fn net(&self, mut ledger: PairwiseLedger) -> DomainResult<PairwiseLedger> {
        let n = ledger.len();
        for a in 0..n {
            for b in (a + 1)..n {
                let diff = ledger.get(a, b).checked_sub(ledger.get(b, a))?;
                if diff.is_positive() {
                    ledger.set(a, b, diff);
                    ledger.set(b, a, Money::ZERO);
                } else if diff.is_negative() {
                    ledger.set(b, a, diff.checked_neg()?);
                    ledger.set(a, b, Money::ZERO);
                } else {
                    ledger.set(a, b, Money::ZERO);
                    ledger.set(b, a, Money::ZERO);
                }
            }
        }
        Ok(ledger)
    }

    /// Whether `ledger` already satisfies the single-positive-direction rule.
    pub fn is_canonical(ledger: &PairwiseLedger) -> bool {
        let n = ledger.len();
        (0..n).all(|a| {
            ledger.get(a, a).is_zero()
                && ((a + 1)..n).all(|b| {
                    let (ab, ba) = (ledger.get(a, b), ledger.get(b, a));
                    !ab.is_negative() && !ba.is_negative() && (ab.is_zero() || ba.is_zero())
                })
        })
    }
}
