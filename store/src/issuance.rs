//! Issuance storage trait.

use crate::StoreError;
use balances_types::Balance;

/// The two scalar issuance cells. Absent cells read as zero.
pub trait IssuanceStore {
    fn total_issuance(&self) -> Result<Balance, StoreError>;
    fn set_total_issuance(&self, value: Balance) -> Result<(), StoreError>;

    /// Issuance that is excluded from the active supply (e.g. locked in
    /// another subsystem).
    fn inactive_issuance(&self) -> Result<Balance, StoreError>;
    fn set_inactive_issuance(&self, value: Balance) -> Result<(), StoreError>;
}

impl<T: IssuanceStore + ?Sized> IssuanceStore for &T {
    fn total_issuance(&self) -> Result<Balance, StoreError> {
        (**self).total_issuance()
    }

    fn set_total_issuance(&self, value: Balance) -> Result<(), StoreError> {
        (**self).set_total_issuance(value)
    }

    fn inactive_issuance(&self) -> Result<Balance, StoreError> {
        (**self).inactive_issuance()
    }

    fn set_inactive_issuance(&self, value: Balance) -> Result<(), StoreError> {
        (**self).set_inactive_issuance(value)
    }
}
