//! Nullable infrastructure for deterministic testing.
//!
//! The engine reaches its state only through the `balances-store` traits.
//! This crate provides an implementation of all of them that:
//! - Is fully deterministic
//! - Can be inspected and seeded programmatically
//! - Never touches the filesystem
//!
//! Usage: construct a [`NullStore`] and inject it wherever a store is needed.

pub mod store;

pub use store::NullStore;
