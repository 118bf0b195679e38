//! Whole-state consistency checks.

use crate::engine::BalancesEngine;
use balances_store::{AccountStore, EventSink, IssuanceStore};
use balances_types::{AccountId, AccountInfo, Balance, DispatchError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InvariantViolation {
    #[error("account {account} keeps {total} below the existential deposit")]
    Unpruned { account: AccountId, total: Balance },

    #[error("account {0} has consumers but no providers")]
    ConsumersWithoutProviders(AccountId),

    #[error("sum of balances {sum} does not match total issuance {issuance}")]
    Conservation { sum: Balance, issuance: Balance },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl<A: AccountStore, I: IssuanceStore, E: EventSink> BalancesEngine<A, I, E> {
    /// Check every stored account and total issuance.
    ///
    /// Forced issuance adjustments break conservation on purpose; after one,
    /// a `Conservation` violation is expected.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let ed = self.minimum_balance();
        let mut sum: Balance = 0;
        let ids = self.accounts.account_ids().map_err(DispatchError::from)?;
        for account in ids {
            let info = self.accounts.account(&account).map_err(DispatchError::from)?;
            let data = info.data;
            if data.total() < ed && data.reserved == 0 && info != AccountInfo::default() {
                return Err(InvariantViolation::Unpruned {
                    account,
                    total: data.total(),
                });
            }
            if info.consumers > 0 && info.providers == 0 {
                return Err(InvariantViolation::ConsumersWithoutProviders(account));
            }
            sum = sum.saturating_add(data.total());
        }

        let issuance = self.total_issuance()?;
        if sum != issuance {
            return Err(InvariantViolation::Conservation { sum, issuance });
        }
        Ok(())
    }
}
