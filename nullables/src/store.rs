//! Nullable store: thread-safe in-memory state for testing and simulation.
//!
//! State is kept the way a trie-backed runtime keeps it: a flat map from
//! hashed storage keys to bincode-encoded values.

use balances_store::account::{AccountStore, DecRefStatus, IncRefStatus};
use balances_store::{
    account_from_key, account_key, storage_prefix, EventSink, IssuanceStore, StorageKey,
    StoreError,
};
use balances_types::{AccountData, AccountId, AccountInfo, Balance, EventRecord};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

const SYSTEM: &str = "System";
const ACCOUNT: &str = "Account";
const BALANCES: &str = "Balances";
const TOTAL_ISSUANCE: &str = "TotalIssuance";
const INACTIVE_ISSUANCE: &str = "InactiveIssuance";

/// Consumer limit used when none is given.
pub const DEFAULT_MAX_CONSUMERS: u32 = 16;

/// An in-memory account, issuance and event store.
pub struct NullStore {
    state: Mutex<BTreeMap<StorageKey, Vec<u8>>>,
    events: Mutex<Vec<EventRecord>>,
    max_consumers: u32,
}

impl NullStore {
    pub fn new() -> Self {
        Self::with_max_consumers(DEFAULT_MAX_CONSUMERS)
    }

    pub fn with_max_consumers(max_consumers: u32) -> Self {
        Self {
            state: Mutex::new(BTreeMap::new()),
            events: Mutex::new(Vec::new()),
            max_consumers,
        }
    }

    /// Overwrite a whole account record, bypassing all reference counting.
    /// Used to seed fixtures such as legacy accounts.
    pub fn put_account_info(&self, who: &AccountId, info: AccountInfo) -> Result<(), StoreError> {
        let mut state = self.lock_state()?;
        Self::write_info(&mut state, who, &info)
    }

    /// All events deposited so far, oldest first.
    pub fn events(&self) -> Vec<EventRecord> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Drain the deposited events.
    pub fn take_events(&self) -> Vec<EventRecord> {
        self.events
            .lock()
            .map(|mut e| std::mem::take(&mut *e))
            .unwrap_or_default()
    }

    /// Run `f` as one storage transaction: when it returns `Err`, every
    /// state write and event it produced is discarded.
    pub fn with_transaction<R, E>(&self, f: impl FnOnce() -> Result<R, E>) -> Result<R, E> {
        let snapshot = self.state.lock().map(|s| s.clone()).ok();
        let event_mark = self.events.lock().map(|e| e.len()).unwrap_or(0);

        let result = f();
        if result.is_err() {
            if let (Some(snapshot), Ok(mut state)) = (snapshot, self.state.lock()) {
                *state = snapshot;
            }
            if let Ok(mut events) = self.events.lock() {
                events.truncate(event_mark);
            }
        }
        result
    }

    /// Number of raw storage entries, issuance cells included.
    pub fn entry_count(&self) -> usize {
        self.state.lock().map(|s| s.len()).unwrap_or(0)
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, BTreeMap<StorageKey, Vec<u8>>>, StoreError> {
        self.state
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn read_info(
        state: &BTreeMap<StorageKey, Vec<u8>>,
        who: &AccountId,
    ) -> Result<Option<AccountInfo>, StoreError> {
        match state.get(&account_key(SYSTEM, ACCOUNT, who)) {
            Some(bytes) => bincode::deserialize(bytes)
                .map(Some)
                .map_err(|e| StoreError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    fn write_info(
        state: &mut BTreeMap<StorageKey, Vec<u8>>,
        who: &AccountId,
        info: &AccountInfo,
    ) -> Result<(), StoreError> {
        let bytes = bincode::serialize(info).map_err(|e| StoreError::Serialization(e.to_string()))?;
        state.insert(account_key(SYSTEM, ACCOUNT, who), bytes);
        Ok(())
    }

    fn remove_info(state: &mut BTreeMap<StorageKey, Vec<u8>>, who: &AccountId) {
        state.remove(&account_key(SYSTEM, ACCOUNT, who));
    }

    fn read_balance(&self, item: &str) -> Result<Balance, StoreError> {
        let state = self.lock_state()?;
        match state.get(storage_prefix(BALANCES, item).as_slice()) {
            Some(bytes) => {
                bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
            }
            None => Ok(0),
        }
    }

    fn write_balance(&self, item: &str, value: Balance) -> Result<(), StoreError> {
        let bytes =
            bincode::serialize(&value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.lock_state()?
            .insert(storage_prefix(BALANCES, item).to_vec(), bytes);
        Ok(())
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for NullStore {
    fn account(&self, who: &AccountId) -> Result<AccountInfo, StoreError> {
        let state = self.lock_state()?;
        Ok(Self::read_info(&state, who)?.unwrap_or_default())
    }

    fn try_mutate_exists(
        &self,
        who: &AccountId,
        data: Option<AccountData>,
    ) -> Result<(), StoreError> {
        let mut state = self.lock_state()?;
        let mut info = Self::read_info(&state, who)?.unwrap_or_default();
        if info.is_alive() {
            info.data = data.unwrap_or_default();
            Self::write_info(&mut state, who, &info)
        } else {
            Self::remove_info(&mut state, who);
            Ok(())
        }
    }

    fn insert(&self, who: &AccountId, data: AccountData) -> Result<(), StoreError> {
        let mut state = self.lock_state()?;
        let mut info = Self::read_info(&state, who)?.unwrap_or_default();
        info.data = data;
        Self::write_info(&mut state, who, &info)
    }

    fn inc_providers(&self, who: &AccountId) -> Result<IncRefStatus, StoreError> {
        let mut state = self.lock_state()?;
        let mut info = Self::read_info(&state, who)?.unwrap_or_default();
        let status = if info.providers == 0 && info.sufficients == 0 {
            info.providers = 1;
            IncRefStatus::Created
        } else {
            info.providers = info.providers.saturating_add(1);
            IncRefStatus::Existed
        };
        Self::write_info(&mut state, who, &info)?;
        Ok(status)
    }

    fn dec_providers(&self, who: &AccountId) -> Result<DecRefStatus, StoreError> {
        let mut state = self.lock_state()?;
        let Some(mut info) = Self::read_info(&state, who)? else {
            tracing::error!(target: "balances", account = %who, "account already dead when reducing provider");
            return Ok(DecRefStatus::Reaped);
        };
        if info.providers == 0 {
            tracing::error!(target: "balances", account = %who, "unexpected underflow in reducing provider");
            info.providers = 1;
        }
        match (info.providers, info.consumers, info.sufficients) {
            (1, 0, 0) => {
                Self::remove_info(&mut state, who);
                Ok(DecRefStatus::Reaped)
            }
            (1, c, _) if c > 0 => Err(StoreError::ConsumerRemaining),
            (x, _, _) => {
                info.providers = x - 1;
                Self::write_info(&mut state, who, &info)?;
                Ok(DecRefStatus::Exists)
            }
        }
    }

    fn inc_consumers(&self, who: &AccountId) -> Result<(), StoreError> {
        let mut state = self.lock_state()?;
        let mut info = Self::read_info(&state, who)?.unwrap_or_default();
        if info.providers == 0 {
            return Err(StoreError::NoProviders);
        }
        if info.consumers >= self.max_consumers {
            return Err(StoreError::TooManyConsumers);
        }
        info.consumers = info.consumers.saturating_add(1);
        Self::write_info(&mut state, who, &info)
    }

    fn inc_consumers_without_limit(&self, who: &AccountId) -> Result<(), StoreError> {
        let mut state = self.lock_state()?;
        let mut info = Self::read_info(&state, who)?.unwrap_or_default();
        if info.providers == 0 {
            return Err(StoreError::NoProviders);
        }
        info.consumers = info.consumers.saturating_add(1);
        Self::write_info(&mut state, who, &info)
    }

    fn dec_consumers(&self, who: &AccountId) -> Result<(), StoreError> {
        let mut state = self.lock_state()?;
        match Self::read_info(&state, who)? {
            Some(mut info) if info.consumers > 0 => {
                info.consumers -= 1;
                Self::write_info(&mut state, who, &info)
            }
            _ => {
                tracing::error!(target: "balances", account = %who, "unexpected underflow in reducing consumer");
                Ok(())
            }
        }
    }

    fn account_ids(&self) -> Result<Vec<AccountId>, StoreError> {
        let prefix = storage_prefix(SYSTEM, ACCOUNT);
        let state = self.lock_state()?;
        Ok(state
            .keys()
            .filter(|k| k.starts_with(&prefix))
            .filter_map(|k| account_from_key(k))
            .collect())
    }
}

impl IssuanceStore for NullStore {
    fn total_issuance(&self) -> Result<Balance, StoreError> {
        self.read_balance(TOTAL_ISSUANCE)
    }

    fn set_total_issuance(&self, value: Balance) -> Result<(), StoreError> {
        self.write_balance(TOTAL_ISSUANCE, value)
    }

    fn inactive_issuance(&self) -> Result<Balance, StoreError> {
        self.read_balance(INACTIVE_ISSUANCE)
    }

    fn set_inactive_issuance(&self, value: Balance) -> Result<(), StoreError> {
        self.write_balance(INACTIVE_ISSUANCE, value)
    }
}

impl EventSink for NullStore {
    fn deposit_event(&self, record: EventRecord) {
        match self.events.lock() {
            Ok(mut events) => events.push(record),
            Err(e) => tracing::error!(target: "balances", "event log poisoned: {e}"),
        }
    }
}
