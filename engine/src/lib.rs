//! Balances: the accounting core of a ledger module.
//!
//! Tracks per-account balances, enforces the existential deposit, maintains
//! provider/consumer reference counts and keeps `TotalIssuance` consistent
//! with every mutation.
//!
//! This crate handles:
//! - Predicting withdraw/deposit outcomes without touching storage
//! - Read-check-write account mutation with dust extraction
//! - Legacy account upgrades and reference-count transitions
//! - Transfers, mints, burns, reserves and freezes
//! - Move-only imbalances that settle against issuance exactly once
//! - The dispatchable call surface

pub mod calls;
pub mod config;
pub mod consequence;
pub mod engine;
pub mod error;
pub mod fungible;
pub mod genesis;
pub mod imbalance;
pub mod invariants;
pub mod issuance;
pub mod lifecycle;
pub mod mutator;
pub mod reserve;

#[cfg(test)]
pub(crate) mod testing;

pub use calls::{AdjustmentDirection, Call};
pub use config::{BalancesConfig, ConfigError};
pub use consequence::AccountView;
pub use engine::BalancesEngine;
pub use error::Error;
pub use genesis::{GenesisConfig, GenesisError};
pub use imbalance::{Dust, NegativeImbalance, PositiveImbalance, SameOrOther};
pub use invariants::InvariantViolation;
pub use issuance::IssuanceLedger;

/// Target used by every log line of this crate.
pub const LOG_TARGET: &str = "balances";
