//! Move-only issuance deltas and the dust they are made from.
//!
//! A [`PositiveImbalance`] records funds added to accounts that total issuance
//! does not cover yet; settling it grows issuance. A [`NegativeImbalance`]
//! records funds removed from accounts; settling it shrinks issuance.
//!
//! Imbalances cannot be cloned. Merging and splitting conserve the amount,
//! and an imbalance dropped without [`Imbalance::settle`] is settled on drop
//! with an error log, so an amount is applied to issuance exactly once.

use crate::issuance::IssuanceLedger;
use crate::LOG_TARGET;
use balances_store::IssuanceStore;
use balances_types::{AccountId, Balance, DispatchError};
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use tracing::error;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Increase {}
    impl Sealed for super::Decrease {}
}

/// Which way an imbalance moves total issuance when settled.
pub trait Direction: sealed::Sealed {
    const NAME: &'static str;

    fn apply<I: IssuanceStore>(
        ledger: &IssuanceLedger<I>,
        amount: Balance,
    ) -> Result<Balance, DispatchError>;
}

/// Settles by growing total issuance.
#[derive(Debug)]
pub enum Increase {}

/// Settles by shrinking total issuance.
#[derive(Debug)]
pub enum Decrease {}

impl Direction for Increase {
    const NAME: &'static str = "PositiveImbalance";

    fn apply<I: IssuanceStore>(
        ledger: &IssuanceLedger<I>,
        amount: Balance,
    ) -> Result<Balance, DispatchError> {
        ledger.increase(amount)
    }
}

impl Direction for Decrease {
    const NAME: &'static str = "NegativeImbalance";

    fn apply<I: IssuanceStore>(
        ledger: &IssuanceLedger<I>,
        amount: Balance,
    ) -> Result<Balance, DispatchError> {
        ledger.decrease(amount)
    }
}

#[must_use = "imbalances must be settled against total issuance"]
pub struct Imbalance<'a, I: IssuanceStore, D: Direction> {
    amount: Balance,
    ledger: &'a IssuanceLedger<I>,
    _direction: PhantomData<D>,
}

pub type PositiveImbalance<'a, I> = Imbalance<'a, I, Increase>;
pub type NegativeImbalance<'a, I> = Imbalance<'a, I, Decrease>;

/// Result of offsetting two opposite imbalances.
#[derive(Debug)]
pub enum SameOrOther<A, B> {
    /// Both sides cancelled out.
    None,
    /// The left side was larger; this is what is left of it.
    Same(A),
    /// The right side was larger; this is what is left of it.
    Other(B),
}

impl<'a, I: IssuanceStore, D: Direction> Imbalance<'a, I, D> {
    pub fn new(amount: Balance, ledger: &'a IssuanceLedger<I>) -> Self {
        Self {
            amount,
            ledger,
            _direction: PhantomData,
        }
    }

    pub fn zero(ledger: &'a IssuanceLedger<I>) -> Self {
        Self::new(0, ledger)
    }

    pub fn peek(&self) -> Balance {
        self.amount
    }

    /// Combine two imbalances of the same direction.
    pub fn merge(mut self, mut other: Self) -> Self {
        self.amount = self.amount.saturating_add(mem::take(&mut other.amount));
        self
    }

    /// Absorb `other` into `self`.
    pub fn subsume(&mut self, mut other: Self) {
        self.amount = self.amount.saturating_add(mem::take(&mut other.amount));
    }

    /// Split off `amount` (capped at what is held); returns `(first, rest)`.
    pub fn split(mut self, amount: Balance) -> (Self, Self) {
        let total = mem::take(&mut self.amount);
        let first = total.min(amount);
        (
            Self::new(first, self.ledger),
            Self::new(total - first, self.ledger),
        )
    }

    /// Apply the amount to total issuance, consuming the imbalance.
    /// Returns the settled amount.
    pub fn settle(mut self) -> Result<Balance, DispatchError> {
        let amount = mem::take(&mut self.amount);
        if amount != 0 {
            D::apply(self.ledger, amount)?;
        }
        Ok(amount)
    }

    fn offset_against<O: Direction>(
        mut self,
        mut other: Imbalance<'a, I, O>,
    ) -> SameOrOther<Self, Imbalance<'a, I, O>> {
        let ours = mem::take(&mut self.amount);
        let theirs = mem::take(&mut other.amount);
        match ours.cmp(&theirs) {
            Ordering::Greater => SameOrOther::Same(Self::new(ours - theirs, self.ledger)),
            Ordering::Less => SameOrOther::Other(Imbalance::new(theirs - ours, other.ledger)),
            Ordering::Equal => SameOrOther::None,
        }
    }
}

impl<'a, I: IssuanceStore> PositiveImbalance<'a, I> {
    /// Cancel against a negative imbalance; only the difference remains.
    pub fn offset(
        self,
        other: NegativeImbalance<'a, I>,
    ) -> SameOrOther<Self, NegativeImbalance<'a, I>> {
        self.offset_against(other)
    }
}

impl<'a, I: IssuanceStore> NegativeImbalance<'a, I> {
    /// Cancel against a positive imbalance; only the difference remains.
    pub fn offset(
        self,
        other: PositiveImbalance<'a, I>,
    ) -> SameOrOther<Self, PositiveImbalance<'a, I>> {
        self.offset_against(other)
    }
}

impl<I: IssuanceStore, D: Direction> Drop for Imbalance<'_, I, D> {
    fn drop(&mut self) {
        let amount = mem::take(&mut self.amount);
        if amount == 0 {
            return;
        }
        error!(
            target: LOG_TARGET,
            kind = D::NAME,
            amount,
            "imbalance dropped without settlement; settling now"
        );
        if let Err(e) = D::apply(self.ledger, amount) {
            error!(target: LOG_TARGET, kind = D::NAME, amount, error = %e, "settlement on drop failed");
        }
    }
}

impl<I: IssuanceStore, D: Direction> fmt::Debug for Imbalance<'_, I, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", D::NAME, self.amount)
    }
}

/// Sub-existential balance removed from an account when it was reaped or
/// zeroed. Must be passed to the dust handler, which destroys it.
#[must_use = "dust must be handed to the dust handler"]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dust {
    who: AccountId,
    amount: Balance,
}

impl Dust {
    pub(crate) fn new(who: AccountId, amount: Balance) -> Self {
        Self { who, amount }
    }

    pub fn who(&self) -> &AccountId {
        &self.who
    }

    pub fn amount(&self) -> Balance {
        self.amount
    }

    /// The dust as funds gone from the accounts.
    pub fn into_imbalance<I: IssuanceStore>(self, ledger: &IssuanceLedger<I>) -> NegativeImbalance<'_, I> {
        NegativeImbalance::new(self.amount, ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balances_nullables::NullStore;

    fn ledger(store: &NullStore, total: Balance) -> IssuanceLedger<&NullStore> {
        store.set_total_issuance(total).unwrap();
        IssuanceLedger::new(store)
    }

    #[test]
    fn settle_moves_issuance_by_direction() {
        let store = NullStore::new();
        let ledger = ledger(&store, 100);

        assert_eq!(PositiveImbalance::new(20, &ledger).settle().unwrap(), 20);
        assert_eq!(ledger.total_issuance().unwrap(), 120);

        assert_eq!(NegativeImbalance::new(50, &ledger).settle().unwrap(), 50);
        assert_eq!(ledger.total_issuance().unwrap(), 70);
    }

    #[test]
    fn merge_and_split_conserve_the_amount() {
        let store = NullStore::new();
        let ledger = ledger(&store, 100);

        let merged = PositiveImbalance::new(3, &ledger).merge(PositiveImbalance::new(4, &ledger));
        assert_eq!(merged.peek(), 7);

        let (first, rest) = merged.split(5);
        assert_eq!((first.peek(), rest.peek()), (5, 2));

        let mut acc = PositiveImbalance::zero(&ledger);
        acc.subsume(first);
        acc.subsume(rest);
        assert_eq!(acc.settle().unwrap(), 7);
        assert_eq!(ledger.total_issuance().unwrap(), 107);
    }

    #[test]
    fn split_beyond_amount_takes_everything() {
        let store = NullStore::new();
        let ledger = ledger(&store, 0);
        let (first, rest) = NegativeImbalance::new(3, &ledger).split(10);
        assert_eq!((first.peek(), rest.peek()), (3, 0));
        let _ = first.settle();
        let _ = rest.settle();
    }

    #[test]
    fn offset_leaves_the_difference() {
        let store = NullStore::new();
        let ledger = ledger(&store, 100);

        match PositiveImbalance::new(10, &ledger).offset(NegativeImbalance::new(4, &ledger)) {
            SameOrOther::Same(rest) => assert_eq!(rest.settle().unwrap(), 6),
            other => panic!("unexpected offset: {other:?}"),
        }
        match NegativeImbalance::new(4, &ledger).offset(PositiveImbalance::new(10, &ledger)) {
            SameOrOther::Other(rest) => assert_eq!(rest.settle().unwrap(), 6),
            other => panic!("unexpected offset: {other:?}"),
        }
        assert!(matches!(
            PositiveImbalance::new(5, &ledger).offset(NegativeImbalance::new(5, &ledger)),
            SameOrOther::None
        ));
        assert_eq!(ledger.total_issuance().unwrap(), 112);
    }

    #[test]
    fn dropping_settles_once() {
        let store = NullStore::new();
        let ledger = ledger(&store, 100);
        {
            let _forgotten = NegativeImbalance::new(30, &ledger);
        }
        assert_eq!(ledger.total_issuance().unwrap(), 70);

        let settled = PositiveImbalance::new(5, &ledger);
        settled.settle().unwrap();
        assert_eq!(ledger.total_issuance().unwrap(), 75);
    }

    #[test]
    fn dust_becomes_a_negative_imbalance() {
        let store = NullStore::new();
        let ledger = ledger(&store, 10);
        let dust = Dust::new(AccountId::repeat_byte(1), 4);
        assert_eq!(dust.amount(), 4);
        dust.into_imbalance(&ledger).settle().unwrap();
        assert_eq!(ledger.total_issuance().unwrap(), 6);
    }
}
