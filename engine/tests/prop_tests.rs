use proptest::prelude::*;

use balances_engine::{AccountView, BalancesConfig, BalancesEngine};
use balances_nullables::NullStore;
use balances_store::IssuanceStore;
use balances_types::{
    AccountData, AccountId, AccountInfo, Balance, ExtraFlags, Fortitude, Precision,
    Preservation, WithdrawConsequence,
};

type Engine<'a> = BalancesEngine<&'a NullStore, &'a NullStore, &'a NullStore>;

fn engine(store: &NullStore, ed: u64) -> Engine<'_> {
    BalancesEngine::new(
        store,
        store,
        store,
        BalancesConfig::default().with_existential_deposit(ed),
    )
}

#[derive(Clone, Debug)]
enum Op {
    Transfer { from: u8, to: u8, amount: Balance, keep_alive: bool },
    Reserve { who: u8, amount: Balance },
    Unreserve { who: u8, amount: Balance },
    Burn { who: u8, amount: Balance },
    Mint { who: u8, amount: Balance },
    SetBalance { who: u8, free: Balance },
    Freeze { who: u8, amount: Balance },
}

fn op() -> impl Strategy<Value = Op> {
    let who = 0u8..4;
    let amount = 0u128..200;
    prop_oneof![
        (who.clone(), who.clone(), amount.clone(), any::<bool>()).prop_map(
            |(from, to, amount, keep_alive)| Op::Transfer { from, to, amount, keep_alive }
        ),
        (who.clone(), amount.clone()).prop_map(|(who, amount)| Op::Reserve { who, amount }),
        (who.clone(), amount.clone()).prop_map(|(who, amount)| Op::Unreserve { who, amount }),
        (who.clone(), amount.clone()).prop_map(|(who, amount)| Op::Burn { who, amount }),
        (who.clone(), amount.clone()).prop_map(|(who, amount)| Op::Mint { who, amount }),
        (who.clone(), amount.clone()).prop_map(|(who, free)| Op::SetBalance { who, free }),
        (who, amount).prop_map(|(who, amount)| Op::Freeze { who, amount }),
    ]
}

fn id(byte: u8) -> AccountId {
    AccountId::repeat_byte(byte + 1)
}

/// Apply one operation as its own transaction; failures roll back.
fn apply(engine: &Engine<'_>, store: &NullStore, op: &Op) {
    let _ = store.with_transaction(|| match *op {
        Op::Transfer { from, to, amount, keep_alive } => {
            let preservation = if keep_alive {
                Preservation::Preserve
            } else {
                Preservation::Expendable
            };
            engine.transfer(&id(from), &id(to), amount, preservation).map(drop)
        }
        Op::Reserve { who, amount } => engine.reserve(&id(who), amount),
        Op::Unreserve { who, amount } => engine.unreserve(&id(who), amount).map(drop),
        Op::Burn { who, amount } => engine
            .burn_from(
                &id(who),
                amount,
                Preservation::Expendable,
                Precision::BestEffort,
                Fortitude::Polite,
            )
            .map(drop),
        Op::Mint { who, amount } => engine.mint_into(&id(who), amount).map(drop),
        Op::SetBalance { who, free } => engine.set_balance(&id(who), free),
        Op::Freeze { who, amount } => engine.set_frozen(&id(who), amount),
    });
}

/// Store one funded account, either current or written by the legacy
/// reference rules, with issuance matching its balance.
fn seed(store: &NullStore, who: &AccountId, data: AccountData, legacy: bool) {
    let mut data = data;
    let consumers = if legacy {
        data.flags = ExtraFlags::legacy();
        0
    } else {
        u32::from(data.needs_consumer())
    };
    store
        .put_account_info(
            who,
            AccountInfo {
                providers: 1,
                consumers,
                data,
                ..AccountInfo::default()
            },
        )
        .unwrap();
    store.set_total_issuance(data.total()).unwrap();
}

fn account_data() -> impl Strategy<Value = (u64, AccountData)> {
    (1u64..50, 0u128..1_000, 0u128..100, 0u128..200).prop_map(|(ed, extra, reserved, frozen)| {
        let data = AccountData {
            free: Balance::from(ed) + extra,
            reserved,
            frozen,
            ..AccountData::default()
        };
        (ed, data)
    })
}

proptest! {
    /// Any sequence of operations keeps balances summing to total issuance,
    /// with no sub-existential account left behind.
    #[test]
    fn operations_preserve_invariants(
        ed in 1u64..20,
        ops in prop::collection::vec(op(), 1..40),
    ) {
        let store = NullStore::new();
        let engine = engine(&store, ed);
        for op in &ops {
            apply(&engine, &store, op);
            prop_assert_eq!(engine.check_invariants(), Ok(()), "after {:?}", op);
        }
    }

    /// Transfers never change total issuance except by destroyed dust.
    #[test]
    fn transfer_conserves_issuance(
        ed in 1u64..10,
        funded in 10u128..1_000,
        amount in 0u128..1_200,
    ) {
        let store = NullStore::new();
        let engine = engine(&store, ed);
        engine.mint_into(&id(0), funded).unwrap();
        let before = engine.total_issuance().unwrap();

        let result = store.with_transaction(|| {
            engine.transfer(&id(0), &id(1), amount, Preservation::Expendable)
        });
        let after = engine.total_issuance().unwrap();
        let total = engine.total_balance(&id(0)).unwrap() + engine.total_balance(&id(1)).unwrap();
        prop_assert_eq!(total, after);
        if result.is_err() {
            prop_assert_eq!(before, after);
        } else {
            prop_assert!(before - after < Balance::from(ed));
        }
    }

    /// Transferring to oneself changes nothing and emits nothing.
    #[test]
    fn self_transfer_is_a_no_op(
        funded in 1u128..1_000,
        amount in 0u128..1_000,
    ) {
        let store = NullStore::new();
        let engine = engine(&store, 1);
        engine.mint_into(&id(0), funded).unwrap();
        store.take_events();

        let result = engine.transfer(&id(0), &id(0), amount, Preservation::Expendable);
        if amount <= funded {
            prop_assert_eq!(result, Ok(amount));
        }
        prop_assert_eq!(engine.free_balance(&id(0)).unwrap(), funded);
        prop_assert!(store.events().is_empty());
    }

    /// A withdrawal predicted to succeed never exceeds the liquid balance.
    #[test]
    fn successful_prediction_is_within_reducible(
        free in 0u128..1_000,
        reserved in 0u128..100,
        frozen in 0u128..200,
        ed in 0u128..50,
        amount in 0u128..1_100,
    ) {
        let view = AccountView {
            info: AccountInfo {
                providers: 1,
                consumers: u32::from(reserved != 0 || frozen != 0),
                data: AccountData { free, reserved, frozen, ..AccountData::default() },
                ..AccountInfo::default()
            },
            can_dec_providers: reserved == 0 && frozen == 0,
            total_issuance: free + reserved,
            existential_deposit: ed,
        };
        match view.can_withdraw(amount) {
            WithdrawConsequence::Success | WithdrawConsequence::ReducedToZero(_) => {
                prop_assert!(amount <= view.reducible_balance(Preservation::Expendable, Fortitude::Polite));
            }
            _ => prop_assert!(amount > 0),
        }
    }

    /// Reducible balance never exceeds free, and stricter policies never
    /// allow more.
    #[test]
    fn reducible_is_monotone_in_policy(
        free in 0u128..1_000,
        reserved in 0u128..100,
        frozen in 0u128..1_000,
        ed in 0u128..50,
        providers in 1u32..3,
    ) {
        let view = AccountView {
            info: AccountInfo {
                providers,
                consumers: u32::from(reserved != 0 || frozen != 0),
                data: AccountData { free, reserved, frozen, ..AccountData::default() },
                ..AccountInfo::default()
            },
            can_dec_providers: providers > 1 || (reserved == 0 && frozen == 0),
            total_issuance: free + reserved,
            existential_deposit: ed,
        };
        let expendable = view.reducible_balance(Preservation::Expendable, Fortitude::Polite);
        let protect = view.reducible_balance(Preservation::Protect, Fortitude::Polite);
        let preserve = view.reducible_balance(Preservation::Preserve, Fortitude::Polite);
        let forced = view.reducible_balance(Preservation::Expendable, Fortitude::Force);
        prop_assert!(forced <= free);
        prop_assert!(expendable <= forced);
        prop_assert!(preserve <= protect);
        prop_assert!(preserve <= expendable);
    }

    /// Once an account is current, a successful prediction means an exact
    /// decrease of that amount goes through.
    #[test]
    fn successful_prediction_allows_exact_decrease(
        (ed, data) in account_data(),
        legacy in any::<bool>(),
        amount in 0u128..1_200,
    ) {
        let store = NullStore::new();
        let engine = engine(&store, ed);
        seed(&store, &id(0), data, legacy);
        engine.ensure_upgraded(&id(0)).unwrap();

        if engine.can_withdraw(&id(0), amount).unwrap() == WithdrawConsequence::Success {
            let free = engine.free_balance(&id(0)).unwrap();
            prop_assert_eq!(
                engine.decrease_balance(
                    &id(0),
                    amount,
                    Precision::Exact,
                    Preservation::Expendable,
                    Fortitude::Polite,
                ),
                Ok(amount)
            );
            prop_assert_eq!(engine.free_balance(&id(0)).unwrap(), free - amount);
        }
    }

    /// A transfer moves exactly the requested amount or fails without
    /// moving anything, legacy sources included.
    #[test]
    fn transfer_is_all_or_nothing(
        (ed, data) in account_data(),
        legacy in any::<bool>(),
        amount in 0u128..1_200,
        keep_alive in any::<bool>(),
    ) {
        let store = NullStore::new();
        let engine = engine(&store, ed);
        seed(&store, &id(0), data, legacy);
        let preservation = if keep_alive {
            Preservation::Preserve
        } else {
            Preservation::Expendable
        };

        let result = store.with_transaction(|| {
            engine.transfer(&id(0), &id(1), amount, preservation)
        });
        match result {
            Ok(moved) => {
                prop_assert_eq!(moved, amount);
                prop_assert_eq!(engine.free_balance(&id(1)).unwrap(), amount);
            }
            Err(_) => {
                prop_assert_eq!(engine.free_balance(&id(1)).unwrap(), 0);
                prop_assert_eq!(engine.free_balance(&id(0)).unwrap(), data.free);
            }
        }
        prop_assert_eq!(engine.check_invariants(), Ok(()));
    }
}
