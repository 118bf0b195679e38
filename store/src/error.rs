use balances_types::DispatchError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("key not found: {0}")]
    NotFound(String),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage is corrupted: {0}")]
    Corruption(String),

    #[error("account has remaining consumers")]
    ConsumerRemaining,

    #[error("account has no providers")]
    NoProviders,

    #[error("too many consumers")]
    TooManyConsumers,
}

impl From<StoreError> for DispatchError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ConsumerRemaining => DispatchError::ConsumerRemaining,
            StoreError::NoProviders => DispatchError::NoProviders,
            StoreError::TooManyConsumers => DispatchError::TooManyConsumers,
            other => DispatchError::Other(other.to_string()),
        }
    }
}
