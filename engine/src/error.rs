//! Errors raised by the balances module itself.
//!
//! These surface to callers as `DispatchError::Module` carrying the module
//! index and the stable code of the variant.

use balances_types::{DispatchError, ModuleError};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum Error {
    #[error("vesting balance too high to send value")]
    VestingBalance,

    #[error("account liquidity restrictions prevent withdrawal")]
    LiquidityRestrictions,

    #[error("balance too low to send value")]
    InsufficientBalance,

    #[error("value too low to create account due to existential deposit")]
    ExistentialDeposit,

    #[error("transfer would kill the account")]
    Expendability,

    #[error("a vesting schedule already exists for this account")]
    ExistingVestingSchedule,

    #[error("beneficiary account must pre-exist")]
    DeadAccount,

    #[error("number of named reserves exceeds the maximum")]
    TooManyReserves,

    #[error("number of holds exceeds the maximum")]
    TooManyHolds,

    #[error("number of freezes exceeds the maximum")]
    TooManyFreezes,

    #[error("issuance cannot be modified since it is already deactivated")]
    IssuanceDeactivated,

    #[error("the delta cannot be zero")]
    DeltaZero,
}

impl Error {
    /// Stable numeric code, part of the external error encoding.
    pub fn code(&self) -> u8 {
        match self {
            Error::VestingBalance => 0,
            Error::LiquidityRestrictions => 1,
            Error::InsufficientBalance => 2,
            Error::ExistentialDeposit => 3,
            Error::Expendability => 4,
            Error::ExistingVestingSchedule => 5,
            Error::DeadAccount => 6,
            Error::TooManyReserves => 7,
            Error::TooManyHolds => 8,
            Error::TooManyFreezes => 9,
            Error::IssuanceDeactivated => 10,
            Error::DeltaZero => 11,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Error::VestingBalance => "VestingBalance",
            Error::LiquidityRestrictions => "LiquidityRestrictions",
            Error::InsufficientBalance => "InsufficientBalance",
            Error::ExistentialDeposit => "ExistentialDeposit",
            Error::Expendability => "Expendability",
            Error::ExistingVestingSchedule => "ExistingVestingSchedule",
            Error::DeadAccount => "DeadAccount",
            Error::TooManyReserves => "TooManyReserves",
            Error::TooManyHolds => "TooManyHolds",
            Error::TooManyFreezes => "TooManyFreezes",
            Error::IssuanceDeactivated => "IssuanceDeactivated",
            Error::DeltaZero => "DeltaZero",
        }
    }

    /// Wrap into the dispatch error of the module at `module_index`.
    pub fn into_dispatch(self, module_index: u8) -> DispatchError {
        DispatchError::Module(ModuleError {
            index: module_index,
            error: self.code(),
            message: Some(self.name()),
        })
    }
}
