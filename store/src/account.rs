//! Account storage trait, including the provider/consumer reference counts.

use crate::StoreError;
use balances_types::{AccountData, AccountId, AccountInfo};

/// Outcome of incrementing an account's providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncRefStatus {
    /// The account did not exist before and was created.
    Created,
    Existed,
}

/// Outcome of decrementing an account's providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecRefStatus {
    /// The last reference went away and the account record was removed.
    Reaped,
    Exists,
}

/// Keyed map `AccountId -> AccountInfo` with reference-count primitives.
///
/// Reading an absent account yields `AccountInfo::default()`; absence is not
/// an error.
pub trait AccountStore {
    fn account(&self, who: &AccountId) -> Result<AccountInfo, StoreError>;

    /// Exists-aware upsert of the balance data.
    ///
    /// The data is written when the account has a provider or sufficient
    /// reference; otherwise the whole record is removed. `None` stores the
    /// default data.
    fn try_mutate_exists(&self, who: &AccountId, data: Option<AccountData>)
        -> Result<(), StoreError>;

    /// Unconditionally write the balance data, creating the record if needed.
    fn insert(&self, who: &AccountId, data: AccountData) -> Result<(), StoreError>;

    fn inc_providers(&self, who: &AccountId) -> Result<IncRefStatus, StoreError>;

    /// Fails with [`StoreError::ConsumerRemaining`] when this would drop the
    /// last provider of an account that still has consumers.
    fn dec_providers(&self, who: &AccountId) -> Result<DecRefStatus, StoreError>;

    /// Fails with [`StoreError::NoProviders`] without a provider and with
    /// [`StoreError::TooManyConsumers`] at the configured limit.
    fn inc_consumers(&self, who: &AccountId) -> Result<(), StoreError>;

    /// Like [`AccountStore::inc_consumers`] but ignores the consumer limit.
    fn inc_consumers_without_limit(&self, who: &AccountId) -> Result<(), StoreError>;

    fn dec_consumers(&self, who: &AccountId) -> Result<(), StoreError>;

    /// Every account id currently holding a record.
    fn account_ids(&self) -> Result<Vec<AccountId>, StoreError>;

    /// Whether one provider could be released without violating consumers.
    fn can_dec_providers(&self, who: &AccountId) -> Result<bool, StoreError> {
        let info = self.account(who)?;
        Ok(info.consumers == 0 || info.providers > 1)
    }

    fn providers(&self, who: &AccountId) -> Result<u32, StoreError> {
        self.account(who).map(|a| a.providers)
    }

    fn consumers(&self, who: &AccountId) -> Result<u32, StoreError> {
        self.account(who).map(|a| a.consumers)
    }

    /// The balance data alone.
    fn data(&self, who: &AccountId) -> Result<AccountData, StoreError> {
        self.account(who).map(|a| a.data)
    }
}

impl<T: AccountStore + ?Sized> AccountStore for &T {
    fn account(&self, who: &AccountId) -> Result<AccountInfo, StoreError> {
        (**self).account(who)
    }

    fn try_mutate_exists(
        &self,
        who: &AccountId,
        data: Option<AccountData>,
    ) -> Result<(), StoreError> {
        (**self).try_mutate_exists(who, data)
    }

    fn insert(&self, who: &AccountId, data: AccountData) -> Result<(), StoreError> {
        (**self).insert(who, data)
    }

    fn inc_providers(&self, who: &AccountId) -> Result<IncRefStatus, StoreError> {
        (**self).inc_providers(who)
    }

    fn dec_providers(&self, who: &AccountId) -> Result<DecRefStatus, StoreError> {
        (**self).dec_providers(who)
    }

    fn inc_consumers(&self, who: &AccountId) -> Result<(), StoreError> {
        (**self).inc_consumers(who)
    }

    fn inc_consumers_without_limit(&self, who: &AccountId) -> Result<(), StoreError> {
        (**self).inc_consumers_without_limit(who)
    }

    fn dec_consumers(&self, who: &AccountId) -> Result<(), StoreError> {
        (**self).dec_consumers(who)
    }

    fn account_ids(&self) -> Result<Vec<AccountId>, StoreError> {
        (**self).account_ids()
    }

    fn can_dec_providers(&self, who: &AccountId) -> Result<bool, StoreError> {
        (**self).can_dec_providers(who)
    }
}
