//! Total and inactive issuance bookkeeping.

use crate::LOG_TARGET;
use balances_store::IssuanceStore;
use balances_types::{Balance, DispatchError};
use tracing::debug;

/// Owns the issuance cells. Adjustments saturate: issuance never wraps.
///
/// Outside of genesis and forced adjustments, the ledger is only moved by
/// settling imbalances.
pub struct IssuanceLedger<I> {
    store: I,
}

impl<I: IssuanceStore> IssuanceLedger<I> {
    pub fn new(store: I) -> Self {
        Self { store }
    }

    pub fn total_issuance(&self) -> Result<Balance, DispatchError> {
        Ok(self.store.total_issuance()?)
    }

    pub fn inactive_issuance(&self) -> Result<Balance, DispatchError> {
        Ok(self.store.inactive_issuance()?)
    }

    /// Total issuance less the inactive part.
    pub fn active_issuance(&self) -> Result<Balance, DispatchError> {
        Ok(self.total_issuance()?.saturating_sub(self.inactive_issuance()?))
    }

    /// Grow total issuance by `amount`; returns the new total.
    pub fn increase(&self, amount: Balance) -> Result<Balance, DispatchError> {
        let old = self.total_issuance()?;
        let new = old.saturating_add(amount);
        self.store.set_total_issuance(new)?;
        debug!(target: LOG_TARGET, old, new, "total issuance increased");
        Ok(new)
    }

    /// Shrink total issuance by `amount`; returns the new total.
    pub fn decrease(&self, amount: Balance) -> Result<Balance, DispatchError> {
        let old = self.total_issuance()?;
        let new = old.saturating_sub(amount);
        self.store.set_total_issuance(new)?;
        debug!(target: LOG_TARGET, old, new, "total issuance decreased");
        Ok(new)
    }

    /// Overwrite total issuance. Reserved for genesis and forced adjustment.
    pub fn set_total_issuance(&self, value: Balance) -> Result<(), DispatchError> {
        Ok(self.store.set_total_issuance(value)?)
    }

    /// Move `amount` out of the active supply. Inactive issuance never
    /// exceeds the total.
    pub fn deactivate(&self, amount: Balance) -> Result<(), DispatchError> {
        let inactive = self
            .inactive_issuance()?
            .saturating_add(amount)
            .min(self.total_issuance()?);
        Ok(self.store.set_inactive_issuance(inactive)?)
    }

    /// Return `amount` to the active supply.
    pub fn reactivate(&self, amount: Balance) -> Result<(), DispatchError> {
        let inactive = self.inactive_issuance()?.saturating_sub(amount);
        Ok(self.store.set_inactive_issuance(inactive)?)
    }
}
