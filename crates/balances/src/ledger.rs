//! Dense pairwise ledger over a sorted member index.
//!
//! Members are mapped to `0..n` by ascending [`MemberId`]; the ledger is an
//! `n × n` row-major matrix where row = debtor and column = creditor. Using
//! plain indices (rather than nested maps keyed by id) makes "visit each
//! unordered pair once" a simple `i < j` loop.

use splitledger_core::{DomainResult, MemberId, Money};

/// Sorted, de-duplicated member ids with index lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberIndex {
    ids: Vec<MemberId>,
}

impl MemberIndex {
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = MemberId>,
    {
        let mut ids: Vec<MemberId> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Position of `id` in the total order, if it belongs to the group.
    pub fn position(&self, id: &MemberId) -> Option<usize> {
        self.ids.binary_search(id).ok()
    }

    pub fn contains(&self, id: &MemberId) -> bool {
        self.position(id).is_some()
    }

    /// Panics if `idx` is out of range.
    pub fn id_at(&self, idx: usize) -> MemberId {
        self.ids[idx]
    }

    pub fn ids(&self) -> &[MemberId] {
        &self.ids
    }
}

/// Directed accrued amounts: `get(d, c)` is what debtor `d` owes creditor `c`.
///
/// Before netting an entry may be negative (a settlement that exceeded the
/// debt recorded in that direction). The diagonal is always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairwiseLedger {
    index: MemberIndex,
    cells: Vec<Money>,
}

impl PairwiseLedger {
    /// All-zero ledger covering every ordered pair of `index`.
    pub fn zeroed(index: MemberIndex) -> Self {
        let n = index.len();
        Self {
            index,
            cells: vec![Money::ZERO; n * n],
        }
    }

    pub fn index(&self) -> &MemberIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn cell(&self, debtor: usize, creditor: usize) -> usize {
        debtor * self.index.len() + creditor
    }

    pub fn get(&self, debtor: usize, creditor: usize) -> Money {
        self.cells[self.cell(debtor, creditor)]
    }

    pub(crate) fn set(&mut self, debtor: usize, creditor: usize, amount: Money) {
        debug_assert!(debtor != creditor || amount.is_zero());
        let cell = self.cell(debtor, creditor);
        self.cells[cell] = amount;
    }

    /// Add `delta` (possibly negative) to `debtor → creditor`.
    pub(crate) fn adjust(&mut self, debtor: usize, creditor: usize, delta: Money) -> DomainResult<()> {
        debug_assert_ne!(debtor, creditor, "self-debt is never recorded");
        let cell = self.cell(debtor, creditor);
        self.cells[cell] = self.cells[cell].checked_add(delta)?;
        Ok(())
    }

    /// Amount `debtor` owes `creditor`, looked up by id.
    ///
    /// `None` when either id is outside the group.
    pub fn owed(&self, debtor: &MemberId, creditor: &MemberId) -> Option<Money> {
        let d = self.index.position(debtor)?;
        let c = self.index.position(creditor)?;
        Some(self.get(d, c))
    }

    /// Non-zero directed entries as `(debtor, creditor, amount)`, row-major.
    pub fn entries(&self) -> impl Iterator<Item = (MemberId, MemberId, Money)> + '_ {
        let n = self.index.len();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.is_zero())
            .map(move |(cell, m)| (self.index.id_at(cell / n), self.index.id_at(cell % n), *m))
    }
}

/// Signed per-member net position, aligned with a [`MemberIndex`].
///
/// Positive means the group owes the member; negative means the member owes
/// the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetTotals {
    amounts: Vec<Money>,
}

impl NetTotals {
    pub fn zeroed(len: usize) -> Self {
        Self {
            amounts: vec![Money::ZERO; len],
        }
    }

    pub fn get(&self, idx: usize) -> Money {
        self.amounts[idx]
    }

    /// Move `amount` from `debtor`'s position to `creditor`'s.
    pub(crate) fn transfer(&mut self, debtor: usize, creditor: usize, amount: Money) -> DomainResult<()> {
        let debited = self.amounts[debtor].checked_sub(amount)?;
        let credited = self.amounts[creditor].checked_add(amount)?;
        self.amounts[debtor] = debited;
        self.amounts[creditor] = credited;
        Ok(())
    }

    /// Exact sum in a wider type; zero whenever conservation holds.
    pub fn sum(&self) -> i128 {
        self.amounts.iter().map(|m| m.minor_units() as i128).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = Money> + '_ {
        self.amounts.iter().copied()
    }
}

/// Ledger and net totals travelling together through stages 1 and 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerState {
    pub ledger: PairwiseLedger,
    pub net_totals: NetTotals,
}

impl LedgerState {
    pub fn zeroed(index: MemberIndex) -> Self {
        let n = index.len();
        Self {
            ledger: PairwiseLedger::zeroed(index),
            net_totals: NetTotals::zeroed(n),
        }
    }

    /// Record that `debtor` owes `creditor` `amount` more than before.
    ///
    /// Negative `amount` reduces the debt (settlements). Both the directed
    /// entry and the net totals move together, so conservation holds after
    /// every call.
    pub(crate) fn accrue(&mut self, debtor: usize, creditor: usize, amount: Money) -> DomainResult<()> {
        self.ledger.adjust(debtor, creditor, amount)?;
        self.net_totals.transfer(debtor, creditor, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn ids(n: u128) -> Vec<MemberId> {
        (1..=n).map(|i| MemberId::from_uuid(Uuid::from_u128(i))).collect()
    }

    #[test]
    fn index_sorts_and_dedups() {
        let v = ids(3);
        let index = MemberIndex::new([v[2], v[0], v[2], v[1]]);
        assert_eq!(index.ids(), &[v[0], v[1], v[2]]);
        assert_eq!(index.position(&v[1]), Some(1));
        assert!(!index.contains(&MemberId::from_uuid(Uuid::from_u128(99))));
    }

    #[test]
    fn accrue_moves_ledger_and_totals_together() {
        let v = ids(2);
        let mut state = LedgerState::zeroed(MemberIndex::new(v.clone()));
        state.accrue(0, 1, Money::from_minor(700)).unwrap();
        state.accrue(0, 1, Money::from_minor(-200)).unwrap();

        assert_eq!(state.ledger.owed(&v[0], &v[1]), Some(Money::from_minor(500)));
        assert_eq!(state.ledger.owed(&v[1], &v[0]), Some(Money::ZERO));
        assert_eq!(state.net_totals.get(0), Money::from_minor(-500));
        assert_eq!(state.net_totals.get(1), Money::from_minor(500));
        assert_eq!(state.net_totals.sum(), 0);
    }

    #[test]
    fn entries_skip_zero_cells() {
        let v = ids(3);
        let mut state = LedgerState::zeroed(MemberIndex::new(v.clone()));
        state.accrue(2, 0, Money::from_minor(10)).unwrap();

        let entries: Vec<_> = state.ledger.entries().collect();
        assert_eq!(entries, vec![(v[2], v[0], Money::from_minor(10))]);
    }
}
