//! The balances engine: the accounting core every operation goes through.

use crate::config::BalancesConfig;
use crate::error::Error;
use crate::issuance::IssuanceLedger;
use balances_store::{AccountStore, EventSink, IssuanceStore};
use balances_types::{AccountData, AccountId, Balance, DispatchError, Event, EventRecord};

/// Balances engine over an account store, the issuance cells and an event
/// sink. All collaborators are injected; the engine keeps no other state.
///
/// Operations are split across modules by concern: predictions live in
/// `consequence`, the read-check-write path in `mutator`, reference counts
/// in `lifecycle`, fungible movements in `fungible`, reserves and freezes in
/// `reserve` and the dispatchable calls in `calls`.
pub struct BalancesEngine<A, I, E> {
    pub(crate) accounts: A,
    pub(crate) issuance: IssuanceLedger<I>,
    pub(crate) events: E,
    pub(crate) config: BalancesConfig,
}

impl<A: AccountStore, I: IssuanceStore, E: EventSink> BalancesEngine<A, I, E> {
    pub fn new(accounts: A, issuance: I, events: E, config: BalancesConfig) -> Self {
        Self {
            accounts,
            issuance: IssuanceLedger::new(issuance),
            events,
            config,
        }
    }

    pub fn config(&self) -> &BalancesConfig {
        &self.config
    }

    pub fn accounts(&self) -> &A {
        &self.accounts
    }

    pub fn issuance(&self) -> &IssuanceLedger<I> {
        &self.issuance
    }

    /// The existential deposit.
    pub fn minimum_balance(&self) -> Balance {
        self.config.existential_deposit()
    }

    pub fn account(&self, who: &AccountId) -> Result<AccountData, DispatchError> {
        Ok(self.accounts.data(who)?)
    }

    pub fn free_balance(&self, who: &AccountId) -> Result<Balance, DispatchError> {
        Ok(self.account(who)?.free)
    }

    pub fn reserved_balance(&self, who: &AccountId) -> Result<Balance, DispatchError> {
        Ok(self.account(who)?.reserved)
    }

    /// Free plus reserved.
    pub fn total_balance(&self, who: &AccountId) -> Result<Balance, DispatchError> {
        Ok(self.account(who)?.total())
    }

    pub fn total_issuance(&self) -> Result<Balance, DispatchError> {
        self.issuance.total_issuance()
    }

    pub fn active_issuance(&self) -> Result<Balance, DispatchError> {
        self.issuance.active_issuance()
    }

    pub fn deactivate(&self, amount: Balance) -> Result<(), DispatchError> {
        self.issuance.deactivate(amount)
    }

    pub fn reactivate(&self, amount: Balance) -> Result<(), DispatchError> {
        self.issuance.reactivate(amount)
    }

    pub(crate) fn deposit_event(&self, event: Event) {
        self.events
            .deposit_event(EventRecord::new(self.config.module_index, event));
    }

    pub(crate) fn module_error(&self, error: Error) -> DispatchError {
        error.into_dispatch(self.config.module_index)
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{alice, bob, endow, engine};
    use balances_nullables::NullStore;

    #[test]
    fn inspection_reads_through_the_store() {
        let store = NullStore::new();
        let engine = engine(&store, 1);
        endow(&engine, &alice(), 40);

        assert_eq!(engine.free_balance(&alice()).unwrap(), 40);
        assert_eq!(engine.total_balance(&alice()).unwrap(), 40);
        assert_eq!(engine.reserved_balance(&bob()).unwrap(), 0);
        assert_eq!(engine.total_issuance().unwrap(), 40);
        assert_eq!(engine.minimum_balance(), 1);
    }

    #[test]
    fn deactivation_only_touches_active_issuance() {
        let store = NullStore::new();
        let engine = engine(&store, 1);
        endow(&engine, &alice(), 100);

        engine.deactivate(40).unwrap();
        assert_eq!(engine.active_issuance().unwrap(), 60);
        assert_eq!(engine.total_issuance().unwrap(), 100);
        engine.reactivate(40).unwrap();
        assert_eq!(engine.active_issuance().unwrap(), 100);
    }
}
