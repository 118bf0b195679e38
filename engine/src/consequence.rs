//! Withdraw and deposit predictions.
//!
//! The rules are pure functions of an [`AccountView`], a snapshot of the
//! state they read. The engine methods only take the snapshot; they never
//! write, and the only error they return is a storage failure.

use crate::engine::BalancesEngine;
use balances_store::{AccountStore, EventSink, IssuanceStore};
use balances_types::{
    AccountId, AccountInfo, Balance, DepositConsequence, DispatchError, Fortitude, Preservation,
    Provenance, WithdrawConsequence,
};

/// Everything the predictions read about one account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccountView {
    pub info: AccountInfo,
    /// Whether the store would let one provider go.
    pub can_dec_providers: bool,
    pub total_issuance: Balance,
    pub existential_deposit: Balance,
}

impl AccountView {
    /// Largest amount of free balance that can leave the account.
    pub fn reducible_balance(&self, preservation: Preservation, force: Fortitude) -> Balance {
        let a = &self.info.data;
        let mut untouchable = match force {
            Fortitude::Polite => a.frozen.saturating_sub(a.reserved),
            Fortitude::Force => 0,
        };
        let keep_provider = match preservation {
            Preservation::Preserve => true,
            Preservation::Protect => a.free != 0 && self.info.providers == 1,
            Preservation::Expendable => a.free != 0 && !self.can_dec_providers,
        };
        if keep_provider {
            untouchable = untouchable.max(self.existential_deposit);
        }
        a.free.saturating_sub(untouchable)
    }

    pub fn can_withdraw(&self, amount: Balance) -> WithdrawConsequence {
        if amount == 0 {
            return WithdrawConsequence::Success;
        }
        if self.total_issuance.checked_sub(amount).is_none() {
            return WithdrawConsequence::Underflow;
        }
        let a = &self.info.data;
        let Some(new_free) = a.free.checked_sub(amount) else {
            return WithdrawConsequence::BalanceLow;
        };

        let liquid = self.reducible_balance(Preservation::Expendable, Fortitude::Polite);
        if amount > liquid {
            return WithdrawConsequence::Frozen;
        }

        let success = if new_free < self.existential_deposit {
            if self.can_dec_providers {
                WithdrawConsequence::ReducedToZero(new_free)
            } else {
                return WithdrawConsequence::WouldDie;
            }
        } else {
            WithdrawConsequence::Success
        };

        // Frozen funds are measured against the whole balance.
        if new_free.saturating_add(a.reserved) < a.frozen {
            return WithdrawConsequence::Frozen;
        }
        success
    }

    pub fn can_deposit(&self, amount: Balance, provenance: Provenance) -> DepositConsequence {
        if amount == 0 {
            return DepositConsequence::Success;
        }
        if provenance == Provenance::Minted && self.total_issuance.checked_add(amount).is_none() {
            return DepositConsequence::Overflow;
        }
        let a = &self.info.data;
        let Some(new_free) = a.free.checked_add(amount) else {
            return DepositConsequence::Overflow;
        };
        if new_free < self.existential_deposit {
            return DepositConsequence::BelowMinimum;
        }
        if a.reserved.checked_add(new_free).is_none() {
            return DepositConsequence::Overflow;
        }
        DepositConsequence::Success
    }
}

impl<A: AccountStore, I: IssuanceStore, E: EventSink> BalancesEngine<A, I, E> {
    pub fn account_view(&self, who: &AccountId) -> Result<AccountView, DispatchError> {
        Ok(AccountView {
            info: self.accounts.account(who)?,
            can_dec_providers: self.accounts.can_dec_providers(who)?,
            total_issuance: self.issuance.total_issuance()?,
            existential_deposit: self.minimum_balance(),
        })
    }

    pub fn reducible_balance(
        &self,
        who: &AccountId,
        preservation: Preservation,
        force: Fortitude,
    ) -> Result<Balance, DispatchError> {
        Ok(self.account_view(who)?.reducible_balance(preservation, force))
    }

    pub fn can_withdraw(
        &self,
        who: &AccountId,
        amount: Balance,
    ) -> Result<WithdrawConsequence, DispatchError> {
        Ok(self.account_view(who)?.can_withdraw(amount))
    }

    pub fn can_deposit(
        &self,
        who: &AccountId,
        amount: Balance,
        provenance: Provenance,
    ) -> Result<DepositConsequence, DispatchError> {
        Ok(self.account_view(who)?.can_deposit(amount, provenance))
    }
}
