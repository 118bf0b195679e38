//! Dispatch error taxonomy shared by every crate.
//!
//! Prediction failures are plain enum tags (see [`crate::consequence`]); a
//! [`DispatchError`] only appears once a prediction has been materialised at
//! a call boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of a dispatchable call.
pub type DispatchResult = Result<(), DispatchError>;

/// Token-specific failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum TokenError {
    #[error("funds are unavailable")]
    NoFunds,

    #[error("account that must exist would die")]
    WouldDie,

    #[error("account cannot exist with the funds that would be given")]
    BelowMinimum,

    #[error("account cannot be created")]
    CannotCreate,

    #[error("the asset in question is unknown")]
    UnknownAsset,

    #[error("funds exist but are frozen")]
    Frozen,

    #[error("operation is not supported by the asset")]
    Unsupported,

    #[error("account cannot be reduced to zero while it must stay alive")]
    NotExpendable,
}

/// Checked arithmetic failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum ArithmeticError {
    #[error("arithmetic underflow")]
    Underflow,

    #[error("arithmetic overflow")]
    Overflow,

    #[error("division by zero")]
    DivisionByZero,
}

/// A module-specific error, addressed by module index and error code.
///
/// Equality and hashing only look at `(index, error)`; `message` is a log aid.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ModuleError {
    pub index: u8,
    pub error: u8,
    #[serde(skip)]
    pub message: Option<&'static str>,
}

impl ModuleError {
    pub fn new(index: u8, error: u8) -> Self {
        Self {
            index,
            error,
            message: None,
        }
    }
}

impl PartialEq for ModuleError {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.error == other.error
    }
}

impl Eq for ModuleError {}

impl std::hash::Hash for ModuleError {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.error.hash(state);
    }
}

impl std::fmt::Display for ModuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.message {
            Some(msg) => write!(f, "module {} error {} ({})", self.index, self.error, msg),
            None => write!(f, "module {} error {}", self.index, self.error),
        }
    }
}

/// The error a failed dispatch call returns.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DispatchError {
    #[error("{0}")]
    Other(String),

    #[error("cannot look up account")]
    CannotLookup,

    #[error("bad origin")]
    BadOrigin,

    #[error("{0}")]
    Module(ModuleError),

    #[error("account has remaining consumers")]
    ConsumerRemaining,

    #[error("account has no providers")]
    NoProviders,

    #[error("too many consumers")]
    TooManyConsumers,

    #[error("token error: {0}")]
    Token(TokenError),

    #[error("arithmetic error: {0}")]
    Arithmetic(ArithmeticError),
}

impl From<TokenError> for DispatchError {
    fn from(e: TokenError) -> Self {
        DispatchError::Token(e)
    }
}

impl From<ArithmeticError> for DispatchError {
    fn from(e: ArithmeticError) -> Self {
        DispatchError::Arithmetic(e)
    }
}

impl From<ModuleError> for DispatchError {
    fn from(e: ModuleError) -> Self {
        DispatchError::Module(e)
    }
}
