//! # Core Abstractions
//!
//! Error types, configuration and the service traits the rest of the crate is
//! wired through.
//!
//! ## Modules
//!
//! - **[`error`]**: Error taxonomy (`AppError`, `FetchError`, `WalletError`, `StorageError`)
//! - **[`config`]**: Environment-driven [`DashboardConfig`]
//! - **[`service`]**: Traits for every external collaborator
//!
//! ## Dependency Injection
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dashboard::core::service::CollectionsProvider;
//!
//! // In production: the HTTP client
//! let collections: Arc<dyn CollectionsProvider> = Arc::new(ApiClient::new(&config));
//!
//! // In tests: a double whose futures the test completes by hand
//! let collections: Arc<dyn CollectionsProvider> = Arc::new(ScriptedCollections::default());
//! ```

pub mod config;
pub mod error;
pub mod service;

pub use config::DashboardConfig;
pub use error::{AppError, FetchError, Result, StorageError, WalletError};
pub use service::{
    Analytics, CollectionsProvider, DashboardView, History, InvestmentsProvider, KeyValueStore,
    WalletService,
};
