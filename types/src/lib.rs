//! Fundamental types for the balances ledger.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account identifiers, balances and account records, the withdraw/deposit
//! consequence classifications, the dispatch error taxonomy, events and origins.

pub mod account;
pub mod amount;
pub mod consequence;
pub mod error;
pub mod event;
pub mod origin;
pub mod state;

pub use account::AccountId;
pub use amount::Balance;
pub use consequence::{
    DepositConsequence, Fortitude, KeepAliveViolation, Precision, Preservation, Provenance,
    WithdrawConsequence,
};
pub use error::{ArithmeticError, DispatchError, DispatchResult, ModuleError, TokenError};
pub use event::{Event, EventRecord};
pub use origin::{MultiAddress, Origin};
pub use state::{AccountData, AccountInfo, ExtraFlags};
