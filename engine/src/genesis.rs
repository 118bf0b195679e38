//! Initial balances.

use crate::engine::BalancesEngine;
use crate::LOG_TARGET;
use balances_store::{AccountStore, EventSink, IssuanceStore};
use balances_types::{AccountData, AccountId, Balance, DispatchError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq)]
pub enum GenesisError {
    #[error("account {account} endowed with {balance}, below the existential deposit")]
    BelowMinimum { account: AccountId, balance: Balance },

    #[error("account {0} endowed more than once")]
    Duplicate(AccountId),

    #[error("genesis balances overflow total issuance")]
    Overflow,

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Accounts and free balances present at genesis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    pub balances: Vec<(AccountId, Balance)>,
}

impl GenesisConfig {
    /// Validate and write the initial state. Total issuance becomes the sum
    /// of the endowments. No events are emitted.
    pub fn build<A: AccountStore, I: IssuanceStore, E: EventSink>(
        &self,
        engine: &BalancesEngine<A, I, E>,
    ) -> Result<Balance, GenesisError> {
        let ed = engine.minimum_balance();
        let mut seen = BTreeSet::new();
        let mut total: Balance = 0;
        for (account, balance) in &self.balances {
            if *balance < ed {
                return Err(GenesisError::BelowMinimum {
                    account: *account,
                    balance: *balance,
                });
            }
            if !seen.insert(*account) {
                return Err(GenesisError::Duplicate(*account));
            }
            total = total.checked_add(*balance).ok_or(GenesisError::Overflow)?;
        }

        for (account, balance) in &self.balances {
            engine
                .accounts
                .inc_providers(account)
                .map_err(DispatchError::from)?;
            engine
                .accounts
                .insert(account, AccountData::new(*balance))
                .map_err(DispatchError::from)?;
        }
        engine.issuance.set_total_issuance(total)?;

        info!(target: LOG_TARGET, accounts = self.balances.len(), total, "genesis built");
        Ok(total)
    }
}
