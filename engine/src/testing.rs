//! Shared fixtures for the unit tests.

use crate::{BalancesConfig, BalancesEngine};
use balances_nullables::NullStore;
use balances_types::{AccountId, Balance, Event};

pub(crate) type TestEngine<'a> = BalancesEngine<&'a NullStore, &'a NullStore, &'a NullStore>;

pub(crate) fn alice() -> AccountId {
    AccountId::repeat_byte(1)
}

pub(crate) fn bob() -> AccountId {
    AccountId::repeat_byte(2)
}

pub(crate) fn charlie() -> AccountId {
    AccountId::repeat_byte(3)
}

pub(crate) fn engine(store: &NullStore, ed: u64) -> TestEngine<'_> {
    let config = BalancesConfig::default().with_existential_deposit(ed);
    BalancesEngine::new(store, store, store, config)
}

/// Mint `amount` into `who` and forget the resulting events.
pub(crate) fn endow(engine: &TestEngine<'_>, who: &AccountId, amount: Balance) {
    engine.mint_into(who, amount).unwrap();
    engine.accounts().take_events();
}

/// Events deposited since the last call, without their records.
pub(crate) fn events(store: &NullStore) -> Vec<Event> {
    store.take_events().into_iter().map(|r| r.event).collect()
}
