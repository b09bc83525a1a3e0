//! # Common Error Types
//!
//! Consolidated error handling for the dashboard core.
//!
//! ## Error Categories
//!
//! - **Fetch** ([`FetchError`]): a data provider future failed, timed out or was dropped
//! - **Wallet** ([`WalletError`]): no wallet capability, or the user declined disclosure
//! - **Storage** ([`StorageError`]): the key-value backend could not be read or written
//! - **NotFound**: an operation referenced a collection slug absent from current state
//! - **Config** / **Validation**: startup configuration and user input problems
//!
//! Every failure is converted to one of these at the boundary where it occurs;
//! nothing is allowed to reach the renderers as a panic.
//!
//! ## Usage Pattern
//!
//! ```rust
//! use dashboard::core::error::{AppError, Result};
//!
//! fn require_slug(slug: &str) -> Result<&str> {
//!     if slug.is_empty() {
//!         return Err(AppError::Validation("slug must not be empty".to_string()));
//!     }
//!     Ok(slug)
//! }
//!
//! assert!(require_slug("").is_err());
//! ```

use std::time::Duration;
use thiserror::Error;

/// Failure of a single data fetch.
///
/// Cloned into every subscriber notification, so it carries messages rather
/// than source errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The remote provider returned an error or an unparseable response
    #[error("provider error: {0}")]
    Provider(String),

    /// The fetch did not complete within the configured bound
    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),

    /// The producing side went away before yielding a value
    #[error("fetch was cancelled")]
    Cancelled,
}

/// Failure to obtain an address from a wallet capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// No wallet capability is present; a valid terminal state, not a fault
    #[error("no wallet provider available")]
    Unavailable,

    /// The user declined to disclose an address
    #[error("wallet request rejected: {0}")]
    Rejected(String),

    /// The wallet endpoint could not be reached or answered garbage
    #[error("wallet RPC error: {0}")]
    Rpc(String),
}

/// Failure of the persisted key-value backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(String),

    #[error("storage serialization error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialize(err.to_string())
    }
}

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A collection slug that is not part of the current listing.
    #[error("Collection not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<shared::AddressError> for AppError {
    fn from(err: shared::AddressError) -> Self {
        AppError::Validation(err.to_string())
    }
}
