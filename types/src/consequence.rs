//! Predicted outcomes of withdrawals and deposits, and the policy enums that
//! steer them.
//!
//! The consequence enums are pure classifications. They are turned into a
//! [`DispatchError`] only by `into_result`, at the call boundary.

use crate::{ArithmeticError, Balance, DispatchError, TokenError};
use serde::{Deserialize, Serialize};

/// Whether a withdrawal may kill the source account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preservation {
    /// The account may be reaped.
    Expendable,
    /// The account may be reaped only if it is not the sole provider of itself.
    Protect,
    /// The account must stay alive.
    Preserve,
}

/// How strictly an amount must be honoured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Precision {
    /// Fail unless the exact amount can be moved.
    Exact,
    /// Move as much as possible up to the amount.
    BestEffort,
}

/// Whether frozen funds may be touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fortitude {
    /// Respect frozen funds.
    Polite,
    /// Ignore frozen funds.
    Force,
}

/// Where deposited funds come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provenance {
    /// Newly created funds; total issuance grows.
    Minted,
    /// Funds moved from elsewhere; total issuance is unchanged.
    Extant,
}

/// Which error a withdrawal that would reap an account that must survive
/// materialises as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeepAliveViolation {
    /// `Token(NotExpendable)`.
    #[default]
    NotExpendable,
    /// `Token(WouldDie)`.
    WouldDie,
}

/// Predicted outcome of withdrawing from an account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WithdrawConsequence {
    /// Not enough free balance.
    BalanceLow,
    /// The account would be reaped but holds a consumer reference that keeps it alive.
    WouldDie,
    UnknownAsset,
    /// Total issuance would underflow. Indicates corrupted state elsewhere.
    Underflow,
    Overflow,
    /// Funds are there but frozen.
    Frozen,
    /// Allowed, but the account is reaped and the given remainder is lost as dust.
    ReducedToZero(Balance),
    Success,
}

impl WithdrawConsequence {
    /// Materialise the prediction.
    ///
    /// `keep_nonzero` is set when the caller requires the account to survive;
    /// a `ReducedToZero` then fails with the error chosen by `violation`.
    /// Returns the dust that would be lost on success.
    pub fn into_result(
        self,
        keep_nonzero: bool,
        violation: KeepAliveViolation,
    ) -> Result<Balance, DispatchError> {
        use WithdrawConsequence::*;
        match self {
            BalanceLow => Err(TokenError::NoFunds.into()),
            WouldDie => Err(TokenError::WouldDie.into()),
            UnknownAsset => Err(TokenError::UnknownAsset.into()),
            Underflow => Err(ArithmeticError::Underflow.into()),
            Overflow => Err(ArithmeticError::Overflow.into()),
            Frozen => Err(TokenError::Frozen.into()),
            ReducedToZero(_) if keep_nonzero => Err(match violation {
                KeepAliveViolation::NotExpendable => TokenError::NotExpendable.into(),
                KeepAliveViolation::WouldDie => TokenError::WouldDie.into(),
            }),
            ReducedToZero(dust) => Ok(dust),
            Success => Ok(0),
        }
    }
}

/// Predicted outcome of depositing into an account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepositConsequence {
    /// The resulting free balance would be below the existential deposit.
    BelowMinimum,
    CannotCreate,
    UnknownAsset,
    Overflow,
    Success,
    Blocked,
}

impl DepositConsequence {
    pub fn into_result(self) -> Result<(), DispatchError> {
        use DepositConsequence::*;
        match self {
            BelowMinimum => Err(TokenError::BelowMinimum.into()),
            CannotCreate => Err(TokenError::CannotCreate.into()),
            UnknownAsset => Err(TokenError::UnknownAsset.into()),
            Overflow => Err(ArithmeticError::Overflow.into()),
            Blocked => Err(TokenError::Unsupported.into()),
            Success => Ok(()),
        }
    }
}
