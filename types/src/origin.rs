//! Call origins and account addressing.

use crate::{AccountId, DispatchError};
use serde::{Deserialize, Serialize};

/// Who is dispatching a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    Root,
    Signed(AccountId),
    None,
}

impl Origin {
    pub fn ensure_root(&self) -> Result<(), DispatchError> {
        match self {
            Origin::Root => Ok(()),
            _ => Err(DispatchError::BadOrigin),
        }
    }

    pub fn ensure_signed(&self) -> Result<AccountId, DispatchError> {
        match self {
            Origin::Signed(who) => Ok(*who),
            _ => Err(DispatchError::BadOrigin),
        }
    }
}

/// The ways a call argument may address an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultiAddress {
    Id(AccountId),
    /// An account index. No index registry exists in this ledger, so these
    /// never resolve.
    Index(u32),
    /// Raw bytes; resolves when exactly 32 bytes long.
    Raw(Vec<u8>),
    Address32([u8; 32]),
}

impl MultiAddress {
    /// Resolve to an account identifier.
    pub fn lookup(&self) -> Result<AccountId, DispatchError> {
        match self {
            MultiAddress::Id(id) => Ok(*id),
            MultiAddress::Address32(bytes) => Ok(AccountId::new(*bytes)),
            MultiAddress::Raw(bytes) => {
                AccountId::from_slice(bytes).ok_or(DispatchError::CannotLookup)
            }
            MultiAddress::Index(_) => Err(DispatchError::CannotLookup),
        }
    }
}

impl From<AccountId> for MultiAddress {
    fn from(id: AccountId) -> Self {
        MultiAddress::Id(id)
    }
}
