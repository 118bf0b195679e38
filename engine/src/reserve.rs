//! Reserved and frozen funds.

use crate::engine::BalancesEngine;
use crate::error::Error;
use balances_store::{AccountStore, EventSink, IssuanceStore};
use balances_types::{AccountData, AccountId, ArithmeticError, Balance, DispatchError, Event};
use std::cmp::Ordering;

impl<A: AccountStore, I: IssuanceStore, E: EventSink> BalancesEngine<A, I, E> {
    /// Move `value` from free to reserved.
    pub fn reserve(&self, who: &AccountId, value: Balance) -> Result<(), DispatchError> {
        if value == 0 {
            return Ok(());
        }
        self.try_mutate_account_handling_dust(who, |account, _| {
            let free = account
                .free
                .checked_sub(value)
                .ok_or_else(|| self.module_error(Error::InsufficientBalance))?;
            let reserved = account
                .reserved
                .checked_add(value)
                .ok_or(ArithmeticError::Overflow)?;
            Ok((
                AccountData {
                    free,
                    reserved,
                    ..*account
                },
                (),
            ))
        })?;
        self.deposit_event(Event::Reserved {
            who: *who,
            amount: value,
        });
        Ok(())
    }

    /// Move up to `value` from reserved back to free. Returns the part of
    /// `value` that could not be unreserved.
    pub fn unreserve(&self, who: &AccountId, value: Balance) -> Result<Balance, DispatchError> {
        if value == 0 {
            return Ok(0);
        }
        if self.total_balance(who)? == 0 {
            return Ok(value);
        }
        let actual = self.try_mutate_account_handling_dust(who, |account, _| {
            let actual = account.reserved.min(value);
            Ok((
                AccountData {
                    free: account.free.saturating_add(actual),
                    reserved: account.reserved - actual,
                    ..*account
                },
                actual,
            ))
        })?;
        self.deposit_event(Event::Unreserved {
            who: *who,
            amount: actual,
        });
        Ok(value - actual)
    }

    /// Set the frozen amount of `who`. Frozen funds stay in the account but
    /// cannot be withdrawn politely. A dead account stays dead and records
    /// no freeze.
    pub fn set_frozen(&self, who: &AccountId, amount: Balance) -> Result<(), DispatchError> {
        let old = self.try_mutate_account_handling_dust(who, |account, _| {
            Ok((
                AccountData {
                    frozen: amount,
                    ..*account
                },
                account.frozen,
            ))
        })?;
        let new = self.accounts.account(who)?.data.frozen;
        match new.cmp(&old) {
            Ordering::Greater => self.deposit_event(Event::Frozen {
                who: *who,
                amount: new - old,
            }),
            Ordering::Less => self.deposit_event(Event::Thawed {
                who: *who,
                amount: old - new,
            }),
            Ordering::Equal => {}
        }
        Ok(())
    }
}
