//! Dispatchable calls: origin checks plus the operations they drive.

use crate::engine::BalancesEngine;
use crate::error::Error;
use crate::imbalance::{Dust, NegativeImbalance, PositiveImbalance};
use crate::LOG_TARGET;
use balances_store::{AccountStore, EventSink, IssuanceStore};
use balances_types::{
    AccountData, AccountId, ArithmeticError, Balance, DispatchError, DispatchResult, Event,
    Fortitude, MultiAddress, Origin, Precision, Preservation,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{info, warn};

/// Direction of a forced issuance adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustmentDirection {
    Increase,
    Decrease,
}

/// A call into the balances module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Call {
    /// Transfer from the signer; the signer may be reaped.
    TransferAllowDeath { dest: MultiAddress, value: Balance },
    /// Root transfer between any two accounts.
    ForceTransfer {
        source: MultiAddress,
        dest: MultiAddress,
        value: Balance,
    },
    /// Transfer from the signer, who must stay alive.
    TransferKeepAlive { dest: MultiAddress, value: Balance },
    /// Transfer everything the signer can spend.
    TransferAll { dest: MultiAddress, keep_alive: bool },
    ForceUnreserve { who: MultiAddress, amount: Balance },
    /// Upgrade any listed legacy accounts.
    UpgradeAccounts { who: Vec<AccountId> },
    ForceSetBalance { who: MultiAddress, new_free: Balance },
    ForceAdjustTotalIssuance {
        direction: AdjustmentDirection,
        delta: Balance,
    },
    /// Burn from the signer's free balance.
    Burn { value: Balance, keep_alive: bool },
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::TransferAllowDeath { .. } => "transfer_allow_death",
            Call::ForceTransfer { .. } => "force_transfer",
            Call::TransferKeepAlive { .. } => "transfer_keep_alive",
            Call::TransferAll { .. } => "transfer_all",
            Call::ForceUnreserve { .. } => "force_unreserve",
            Call::UpgradeAccounts { .. } => "upgrade_accounts",
            Call::ForceSetBalance { .. } => "force_set_balance",
            Call::ForceAdjustTotalIssuance { .. } => "force_adjust_total_issuance",
            Call::Burn { .. } => "burn",
        }
    }
}

impl<A: AccountStore, I: IssuanceStore, E: EventSink> BalancesEngine<A, I, E> {
    /// Check the origin and run `call`.
    ///
    /// A failed call may have written partial state; the host discards
    /// storage writes and events of failed calls.
    pub fn dispatch(&self, origin: &Origin, call: Call) -> DispatchResult {
        let name = call.name();
        let result = self.dispatch_inner(origin, call);
        if let Err(e) = &result {
            warn!(target: LOG_TARGET, call = name, error = %e, "call failed");
        }
        result
    }

    fn dispatch_inner(&self, origin: &Origin, call: Call) -> DispatchResult {
        match call {
            Call::TransferAllowDeath { dest, value } => {
                let source = origin.ensure_signed()?;
                self.transfer(&source, &dest.lookup()?, value, Preservation::Expendable)?;
            }
            Call::ForceTransfer {
                source,
                dest,
                value,
            } => {
                origin.ensure_root()?;
                self.transfer(
                    &source.lookup()?,
                    &dest.lookup()?,
                    value,
                    Preservation::Expendable,
                )?;
            }
            Call::TransferKeepAlive { dest, value } => {
                let source = origin.ensure_signed()?;
                self.transfer(&source, &dest.lookup()?, value, Preservation::Preserve)?;
            }
            Call::TransferAll { dest, keep_alive } => {
                let source = origin.ensure_signed()?;
                self.transfer_all(&source, &dest.lookup()?, keep_alive)?;
            }
            Call::ForceUnreserve { who, amount } => {
                origin.ensure_root()?;
                self.unreserve(&who.lookup()?, amount)?;
            }
            Call::UpgradeAccounts { who } => {
                origin.ensure_signed()?;
                let mut upgraded = 0usize;
                for account in &who {
                    if self.ensure_upgraded(account)? {
                        upgraded += 1;
                    }
                }
                info!(target: LOG_TARGET, requested = who.len(), upgraded, "accounts upgraded");
            }
            Call::ForceSetBalance { who, new_free } => {
                origin.ensure_root()?;
                self.set_balance(&who.lookup()?, new_free)?;
            }
            Call::ForceAdjustTotalIssuance { direction, delta } => {
                origin.ensure_root()?;
                self.force_adjust_total_issuance(direction, delta)?;
            }
            Call::Burn { value, keep_alive } => {
                let source = origin.ensure_signed()?;
                let preservation = if keep_alive {
                    Preservation::Preserve
                } else {
                    Preservation::Expendable
                };
                self.burn_from(
                    &source,
                    value,
                    preservation,
                    Precision::Exact,
                    Fortitude::Polite,
                )?;
            }
        }
        Ok(())
    }

    /// Transfer all politely spendable funds of `source`.
    pub fn transfer_all(
        &self,
        source: &AccountId,
        dest: &AccountId,
        keep_alive: bool,
    ) -> Result<Balance, DispatchError> {
        let preservation = if keep_alive {
            Preservation::Preserve
        } else {
            Preservation::Expendable
        };
        self.ensure_upgraded(source)?;
        let reducible = self.reducible_balance(source, preservation, Fortitude::Polite)?;
        self.transfer(source, dest, reducible, preservation)
    }

    /// Set the free balance of `who`, with issuance following the change.
    ///
    /// A value under the existential deposit wipes the free balance. If
    /// nothing is reserved the account is reaped and its whole previous free
    /// balance is lost as dust.
    pub fn set_balance(&self, who: &AccountId, new_free: Balance) -> DispatchResult {
        let wipeout = new_free < self.minimum_balance();
        let new_free = if wipeout { 0 } else { new_free };

        let ((old_free, reserved), dust) = self.try_mutate_account(who, |account, _| {
            Ok((
                AccountData {
                    free: new_free,
                    ..*account
                },
                (account.free, account.reserved),
            ))
        })?;
        if let Some(dust) = dust {
            self.handle_dust(dust)?;
        }

        if wipeout && reserved == 0 && old_free > 0 {
            let dust: Dust = self.dust_lost(who, old_free);
            self.handle_dust(dust)?;
        } else {
            match new_free.cmp(&old_free) {
                Ordering::Greater => {
                    PositiveImbalance::new(new_free - old_free, &self.issuance).settle()?;
                }
                Ordering::Less => {
                    NegativeImbalance::new(old_free - new_free, &self.issuance).settle()?;
                }
                Ordering::Equal => {}
            }
        }

        info!(target: LOG_TARGET, account = %who, old_free, new_free, "balance set");
        self.deposit_event(Event::BalanceSet {
            who: *who,
            free: new_free,
        });
        Ok(())
    }

    /// Adjust total issuance directly, leaving every account untouched.
    pub fn force_adjust_total_issuance(
        &self,
        direction: AdjustmentDirection,
        delta: Balance,
    ) -> DispatchResult {
        if delta == 0 {
            return Err(self.module_error(Error::DeltaZero));
        }
        let old = self.issuance.total_issuance()?;
        let new = match direction {
            AdjustmentDirection::Increase => {
                old.checked_add(delta).ok_or(ArithmeticError::Overflow)?
            }
            AdjustmentDirection::Decrease => {
                old.checked_sub(delta).ok_or(ArithmeticError::Underflow)?
            }
        };
        if self.issuance.inactive_issuance()? > new {
            return Err(self.module_error(Error::IssuanceDeactivated));
        }
        self.issuance.set_total_issuance(new)?;

        warn!(target: LOG_TARGET, old, new, "total issuance forced");
        self.deposit_event(Event::TotalIssuanceForced { old, new });
        Ok(())
    }
}
