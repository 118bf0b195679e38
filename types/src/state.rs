//! Stored account records.

use crate::Balance;
use serde::{Deserialize, Serialize};

/// Bit flags carried alongside an account's balances.
///
/// The top bit marks an account that has been migrated to the
/// provider/consumer accounting. Fresh accounts are created with it set;
/// only records written by the legacy logic lack it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtraFlags(u128);

impl ExtraFlags {
    pub const IS_NEW_LOGIC: u128 = 0x8000_0000_0000_0000_0000_0000_0000_0000;

    /// Flags as written by the legacy accounting logic (no bits set).
    pub const fn legacy() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u128) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u128 {
        self.0
    }

    pub fn is_new_logic(&self) -> bool {
        self.0 & Self::IS_NEW_LOGIC == Self::IS_NEW_LOGIC
    }

    pub fn set_new_logic(&mut self) {
        self.0 |= Self::IS_NEW_LOGIC;
    }
}

impl Default for ExtraFlags {
    fn default() -> Self {
        Self(Self::IS_NEW_LOGIC)
    }
}

/// The financial record of an account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData {
    /// Balance that can be transferred or reserved.
    pub free: Balance,
    /// Balance set aside by other subsystems; still counts towards existence.
    pub reserved: Balance,
    /// Part of `free + reserved` that may not be withdrawn.
    pub frozen: Balance,
    pub flags: ExtraFlags,
}

impl AccountData {
    pub fn new(free: Balance) -> Self {
        Self {
            free,
            ..Self::default()
        }
    }

    /// `free + reserved`, saturating.
    pub fn total(&self) -> Balance {
        self.free.saturating_add(self.reserved)
    }

    /// Whether this record holds anything that needs a consumer reference.
    pub fn needs_consumer(&self) -> bool {
        self.reserved != 0 || self.frozen != 0
    }
}

/// The stored unit kept by the account store for every account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub nonce: u32,
    /// Number of other modules that depend on this account existing.
    pub consumers: u32,
    /// Number of reasons this account is allowed to exist.
    pub providers: u32,
    /// Providers that do not need a consumer-free account to be reaped.
    pub sufficients: u32,
    pub data: AccountData,
}

impl AccountInfo {
    /// Whether the store would keep this record at all.
    pub fn is_alive(&self) -> bool {
        self.providers > 0 || self.sufficients > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_are_new_logic() {
        assert!(ExtraFlags::default().is_new_logic());
        assert!(!ExtraFlags::legacy().is_new_logic());
    }

    #[test]
    fn set_new_logic_is_sticky() {
        let mut flags = ExtraFlags::from_bits(0b101);
        flags.set_new_logic();
        assert!(flags.is_new_logic());
        assert_eq!(flags.bits() & 0b101, 0b101);
        flags.set_new_logic();
        assert!(flags.is_new_logic());
    }

    #[test]
    fn total_saturates() {
        let data = AccountData {
            free: u128::MAX,
            reserved: 10,
            ..AccountData::default()
        };
        assert_eq!(data.total(), u128::MAX);
    }

    #[test]
    fn needs_consumer_for_reserve_or_freeze() {
        assert!(!AccountData::new(10).needs_consumer());
        let reserved = AccountData {
            reserved: 1,
            ..AccountData::default()
        };
        assert!(reserved.needs_consumer());
        let frozen = AccountData {
            frozen: 1,
            ..AccountData::default()
        };
        assert!(frozen.needs_consumer());
    }
}
