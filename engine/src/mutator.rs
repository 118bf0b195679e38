//! Read-check-write mutation of one account.

use crate::engine::BalancesEngine;
use crate::error::Error;
use crate::imbalance::Dust;
use crate::lifecycle::RefTransition;
use crate::LOG_TARGET;
use balances_store::{AccountStore, EventSink, IssuanceStore};
use balances_types::{AccountData, AccountId, Balance, DispatchError, Event, Fortitude, Preservation};
use tracing::debug;

impl<A: AccountStore, I: IssuanceStore, E: EventSink> BalancesEngine<A, I, E> {
    /// Mutate an account through `f`, which gets the current data and whether
    /// the account is new and returns the new data plus a result.
    ///
    /// `f` must not touch storage: if it fails, nothing has been written.
    /// After it succeeds the reference counts are moved, and an account whose
    /// free balance fell under the existential deposit with nothing reserved
    /// is cleared. Its remaining free balance comes back as [`Dust`], which
    /// the caller must hand to [`BalancesEngine::handle_dust`].
    pub fn try_mutate_account<R>(
        &self,
        who: &AccountId,
        f: impl FnOnce(&AccountData, bool) -> Result<(AccountData, R), DispatchError>,
    ) -> Result<(R, Option<Dust>), DispatchError> {
        self.ensure_upgraded(who)?;
        let info = self.accounts.account(who)?;
        let ed = self.minimum_balance();
        let is_new = info.data == AccountData::default();

        let (new, result) = f(&info.data, is_new)?;

        let condemned = new.free < ed && new.reserved == 0;
        let stored = if condemned { AccountData::default() } else { new };
        self.update_providers(who, RefTransition::new(&info, &stored, ed))?;

        if condemned {
            self.accounts.try_mutate_exists(who, None)?;
        } else {
            self.accounts.try_mutate_exists(who, Some(stored))?;
            if is_new {
                self.deposit_event(Event::Endowed {
                    account: *who,
                    free_balance: stored.free,
                });
            }
        }
        debug!(
            target: LOG_TARGET,
            account = %who,
            free = stored.free,
            reserved = stored.reserved,
            condemned,
            "account mutated"
        );

        let dust = (condemned && new.free > 0).then(|| self.dust_lost(who, new.free));
        Ok((result, dust))
    }

    /// Overwrite the account data, with the same lifecycle handling as
    /// [`BalancesEngine::try_mutate_account`].
    pub fn try_mutate_account_new(
        &self,
        who: &AccountId,
        data: AccountData,
    ) -> Result<Option<Dust>, DispatchError> {
        self.try_mutate_account(who, |_, _| Ok((data, ())))
            .map(|((), dust)| dust)
    }

    /// [`BalancesEngine::try_mutate_account`] followed by destroying any dust.
    pub fn try_mutate_account_handling_dust<R>(
        &self,
        who: &AccountId,
        f: impl FnOnce(&AccountData, bool) -> Result<(AccountData, R), DispatchError>,
    ) -> Result<R, DispatchError> {
        let (result, dust) = self.try_mutate_account(who, f)?;
        if let Some(dust) = dust {
            self.handle_dust(dust)?;
        }
        Ok(result)
    }

    /// Set the free balance outright. The reduction may not exceed what could
    /// be withdrawn with frozen funds ignored.
    pub fn write_balance(
        &self,
        who: &AccountId,
        amount: Balance,
    ) -> Result<Option<Dust>, DispatchError> {
        let max_reduction =
            self.reducible_balance(who, Preservation::Expendable, Fortitude::Force)?;
        let ((), dust) = self.try_mutate_account(who, |account, _| {
            let reduction = account.free.saturating_sub(amount);
            if reduction > max_reduction {
                return Err(self.module_error(Error::InsufficientBalance));
            }
            Ok((
                AccountData {
                    free: amount,
                    ..*account
                },
                (),
            ))
        })?;
        Ok(dust)
    }

    /// Destroy dust: it leaves total issuance.
    pub fn handle_dust(&self, dust: Dust) -> Result<(), DispatchError> {
        let amount = dust.into_imbalance(&self.issuance).settle()?;
        debug!(target: LOG_TARGET, amount, "dust destroyed");
        Ok(())
    }

    pub(crate) fn dust_lost(&self, who: &AccountId, amount: Balance) -> Dust {
        self.deposit_event(Event::DustLost {
            account: *who,
            amount,
        });
        Dust::new(*who, amount)
    }
}
