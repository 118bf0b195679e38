//! Abstract storage traits for the balances ledger.
//!
//! The engine depends only on these traits. Every backend (the in-memory
//! `NullStore` for tests and simulation, or a real state database) implements
//! them. All methods take `&self`: backends use interior mutability, and the
//! host serialises calls, so no locking discipline is required above them.

pub mod account;
pub mod error;
pub mod event;
pub mod issuance;
pub mod key;

pub use account::{AccountStore, DecRefStatus, IncRefStatus};
pub use error::StoreError;
pub use event::EventSink;
pub use issuance::IssuanceStore;
pub use key::{account_from_key, account_key, blake2_128, storage_prefix, StorageKey};
