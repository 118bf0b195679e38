//! Account lifecycle: legacy record upgrades and the provider/consumer
//! reference transitions that follow a balance change.

use crate::engine::BalancesEngine;
use crate::imbalance::PositiveImbalance;
use crate::LOG_TARGET;
use balances_store::{AccountStore, EventSink, IssuanceStore};
use balances_types::{AccountData, AccountId, AccountInfo, Balance, DispatchError, Event};
use tracing::{debug, error, warn};

/// How one balance change moves an account's reference counts.
///
/// An account *provides* for itself while its free balance is at least the
/// existential deposit, and *consumes* while it has reserved or frozen funds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefTransition {
    pub did_provide: bool,
    pub does_provide: bool,
    pub did_consume: bool,
    pub does_consume: bool,
}

impl RefTransition {
    /// Transition from the stored record `old` to the data about to be stored.
    pub fn new(old: &AccountInfo, new: &AccountData, ed: Balance) -> Self {
        let is_new = old.data == AccountData::default();
        Self {
            did_provide: old.data.free >= ed && (ed != 0 || old.providers > 0),
            does_provide: new.free >= ed,
            did_consume: !is_new && old.data.needs_consumer(),
            does_consume: new.needs_consumer(),
        }
    }
}

impl<A: AccountStore, I: IssuanceStore, E: EventSink> BalancesEngine<A, I, E> {
    /// Bring a record written under the legacy reference rules up to date.
    ///
    /// Returns `true` if the account was upgraded, `false` if it already
    /// followed the current rules. Idempotent.
    pub fn ensure_upgraded(&self, who: &AccountId) -> Result<bool, DispatchError> {
        let info = self.accounts.account(who)?;
        let mut data = info.data;
        if data.flags.is_new_logic() {
            return Ok(false);
        }
        data.flags.set_new_logic();

        let mut top_up = 0;
        if data.reserved != 0 && data.frozen == 0 {
            if info.providers == 0 {
                warn!(
                    target: LOG_TARGET,
                    account = %who,
                    reserved = data.reserved,
                    "legacy account holds reserved funds without a provider"
                );
                let ed = self.minimum_balance();
                top_up = ed.saturating_sub(data.free);
                data.free = data.free.max(ed);
                self.accounts.inc_providers(who)?;
            }
            if let Err(e) = self.accounts.inc_consumers_without_limit(who) {
                error!(target: LOG_TARGET, account = %who, error = %e, "upgrade could not add a consumer");
            }
        }
        self.accounts.try_mutate_exists(who, Some(data))?;
        if top_up > 0 {
            PositiveImbalance::new(top_up, &self.issuance).settle()?;
        }

        debug!(target: LOG_TARGET, account = %who, top_up, "account upgraded");
        self.deposit_event(Event::Upgraded { who: *who });
        Ok(true)
    }

    /// Apply a reference transition. When releasing the provider fails, the
    /// consumer change made here is undone before the error is returned.
    pub(crate) fn update_providers(
        &self,
        who: &AccountId,
        t: RefTransition,
    ) -> Result<(), DispatchError> {
        if !t.did_provide && t.does_provide {
            self.accounts.inc_providers(who)?;
        }
        if t.did_consume && !t.does_consume {
            self.accounts.dec_consumers(who)?;
        }
        if !t.did_consume && t.does_consume {
            self.accounts.inc_consumers(who)?;
        }
        if t.does_consume && self.accounts.consumers(who)? == 0 {
            warn!(target: LOG_TARGET, account = %who, "consuming account has no consumer reference");
            self.accounts.inc_consumers(who)?;
        }
        if t.did_provide && !t.does_provide {
            if let Err(e) = self.accounts.dec_providers(who) {
                let undo = if t.did_consume && !t.does_consume {
                    self.accounts.inc_consumers(who)
                } else if !t.did_consume && t.does_consume {
                    self.accounts.dec_consumers(who)
                } else {
                    Ok(())
                };
                if let Err(undo_err) = undo {
                    error!(target: LOG_TARGET, account = %who, error = %undo_err, "consumer rollback failed");
                }
                return Err(e.into());
            }
        }
        Ok(())
    }
}
