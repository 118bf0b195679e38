//! Shared utilities for the balances ledger.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingError};
