//! Balance type.
//!
//! Balances are raw `u128` units. The arithmetic in this workspace is always
//! `checked_*` or `saturating_*`; a plain `+`/`-` on a balance is a bug.

/// An amount of the native token, in raw units.
pub type Balance = u128;
