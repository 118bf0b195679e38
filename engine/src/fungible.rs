//! Fungible movements: increase/decrease, transfer, mint and burn, and the
//! imbalance-returning deposit/withdraw pair.

use crate::engine::BalancesEngine;
use crate::imbalance::{NegativeImbalance, PositiveImbalance};
use crate::LOG_TARGET;
use balances_store::{AccountStore, EventSink, IssuanceStore};
use balances_types::{
    AccountId, ArithmeticError, Balance, DispatchError, Event, Fortitude, Precision,
    Preservation, Provenance, TokenError,
};
use tracing::{debug, error};

impl<A: AccountStore, I: IssuanceStore, E: EventSink> BalancesEngine<A, I, E> {
    /// Add to the free balance without touching issuance. Returns the amount
    /// actually added. A result under the existential deposit adds nothing
    /// (best effort) or fails (exact).
    pub fn increase_balance(
        &self,
        who: &AccountId,
        amount: Balance,
        precision: Precision,
    ) -> Result<Balance, DispatchError> {
        self.ensure_upgraded(who)?;
        let old = self.free_balance(who)?;
        let new = match precision {
            Precision::BestEffort => old.saturating_add(amount),
            Precision::Exact => old.checked_add(amount).ok_or(ArithmeticError::Overflow)?,
        };
        if new < self.minimum_balance() {
            return match precision {
                Precision::BestEffort => Ok(0),
                Precision::Exact => Err(TokenError::BelowMinimum.into()),
            };
        }
        if new == old {
            return Ok(0);
        }
        if let Some(dust) = self.write_balance(who, new)? {
            self.handle_dust(dust)?;
        }
        Ok(new - old)
    }

    /// Take from the free balance without touching issuance. Returns the
    /// amount actually taken; any dust left behind is destroyed.
    pub fn decrease_balance(
        &self,
        who: &AccountId,
        amount: Balance,
        precision: Precision,
        preservation: Preservation,
        force: Fortitude,
    ) -> Result<Balance, DispatchError> {
        self.ensure_upgraded(who)?;
        let old = self.free_balance(who)?;
        let reducible = self.reducible_balance(who, preservation, force)?;
        let amount = match precision {
            Precision::BestEffort => amount.min(reducible),
            Precision::Exact if amount > reducible => return Err(TokenError::NoFunds.into()),
            Precision::Exact => amount,
        };
        let new = old.checked_sub(amount).ok_or(TokenError::NoFunds)?;
        if let Some(dust) = self.write_balance(who, new)? {
            self.handle_dust(dust)?;
        }
        Ok(amount)
    }

    /// Move `amount` from `source` to `dest`, or nothing at all. Issuance only
    /// changes by dust destroyed when `source` is reaped.
    pub fn transfer(
        &self,
        source: &AccountId,
        dest: &AccountId,
        amount: Balance,
        preservation: Preservation,
    ) -> Result<Balance, DispatchError> {
        // Upgrading can add a consumer, which shrinks what `source` may spend.
        self.ensure_upgraded(source)?;
        self.ensure_upgraded(dest)?;
        let keep_alive = preservation != Preservation::Expendable;
        self.can_withdraw(source, amount)?
            .into_result(keep_alive, self.config.keep_alive_violation)?;
        self.can_deposit(dest, amount, Provenance::Extant)?
            .into_result()?;
        if source == dest {
            return Ok(amount);
        }

        self.decrease_balance(
            source,
            amount,
            Precision::Exact,
            preservation,
            Fortitude::Polite,
        )?;
        // Feasibility was checked above; failing here means corrupt state.
        match self.increase_balance(dest, amount, Precision::BestEffort) {
            Ok(credited) if credited == amount => {}
            Ok(credited) => {
                error!(target: LOG_TARGET, dest = %dest, amount, credited, "credit fell short of debit");
                return Err(DispatchError::Other(format!(
                    "credited {credited} of {amount} to {dest}"
                )));
            }
            Err(e) => {
                error!(target: LOG_TARGET, dest = %dest, amount, error = %e, "credit after debit failed");
                return Err(e);
            }
        }

        debug!(target: LOG_TARGET, from = %source, to = %dest, amount, "transfer");
        self.deposit_event(Event::Transfer {
            from: *source,
            to: *dest,
            amount,
        });
        Ok(amount)
    }

    /// Create `amount` new funds in `who`.
    pub fn mint_into(&self, who: &AccountId, amount: Balance) -> Result<Balance, DispatchError> {
        self.can_deposit(who, amount, Provenance::Minted)?
            .into_result()?;
        let actual = self.increase_balance(who, amount, Precision::Exact)?;
        PositiveImbalance::new(actual, &self.issuance).settle()?;
        self.deposit_event(Event::Minted {
            who: *who,
            amount: actual,
        });
        Ok(actual)
    }

    /// Destroy up to `amount` of `who`'s funds.
    pub fn burn_from(
        &self,
        who: &AccountId,
        amount: Balance,
        preservation: Preservation,
        precision: Precision,
        force: Fortitude,
    ) -> Result<Balance, DispatchError> {
        self.ensure_upgraded(who)?;
        let actual = self.reducible_balance(who, preservation, force)?.min(amount);
        if precision == Precision::Exact && actual != amount {
            return Err(TokenError::NoFunds.into());
        }
        self.can_withdraw(who, actual)?.into_result(
            preservation != Preservation::Expendable,
            self.config.keep_alive_violation,
        )?;
        let actual =
            self.decrease_balance(who, actual, Precision::BestEffort, preservation, force)?;
        NegativeImbalance::new(actual, &self.issuance).settle()?;
        self.deposit_event(Event::Burned {
            who: *who,
            amount: actual,
        });
        Ok(actual)
    }

    /// Credit `who` without creating issuance. The returned imbalance grows
    /// issuance by the credited amount once settled.
    pub fn deposit(
        &self,
        who: &AccountId,
        value: Balance,
        precision: Precision,
    ) -> Result<PositiveImbalance<'_, I>, DispatchError> {
        let increase = self.increase_balance(who, value, precision)?;
        self.deposit_event(Event::Deposit {
            who: *who,
            amount: increase,
        });
        Ok(PositiveImbalance::new(increase, &self.issuance))
    }

    /// Debit `who` without destroying issuance. The returned imbalance
    /// shrinks issuance by the debited amount once settled.
    pub fn withdraw(
        &self,
        who: &AccountId,
        value: Balance,
        precision: Precision,
        preservation: Preservation,
        force: Fortitude,
    ) -> Result<NegativeImbalance<'_, I>, DispatchError> {
        let decrease = self.decrease_balance(who, value, precision, preservation, force)?;
        self.deposit_event(Event::Withdraw {
            who: *who,
            amount: decrease,
        });
        Ok(NegativeImbalance::new(decrease, &self.issuance))
    }

    /// Grow issuance now; the funds belong to no account yet. Dropping the
    /// returned imbalance unspent takes them back out.
    pub fn issue(&self, amount: Balance) -> Result<NegativeImbalance<'_, I>, DispatchError> {
        let before = self.total_issuance()?;
        let amount = self.issuance.increase(amount)? - before;
        self.deposit_event(Event::Issued { amount });
        Ok(NegativeImbalance::new(amount, &self.issuance))
    }

    /// Shrink issuance now. Settling the returned imbalance restores it.
    pub fn rescind(&self, amount: Balance) -> Result<PositiveImbalance<'_, I>, DispatchError> {
        let before = self.total_issuance()?;
        let amount = before - self.issuance.decrease(amount)?;
        self.deposit_event(Event::Rescinded { amount });
        Ok(PositiveImbalance::new(amount, &self.issuance))
    }
}
