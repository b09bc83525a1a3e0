//! # Service Traits
//!
//! Seams between the dashboard core and its external collaborators. Every
//! collaborator is injected as an `Arc<dyn Trait>` so tests can substitute
//! hand-written doubles.

use async_trait::async_trait;
use shared::{Address, CollectionEntry, InvestmentStats};

use super::error::{FetchError, StorageError, WalletError};
use crate::session::{ChainConnection, NavigationEntry};

/// Remote source of the collections an address holds.
#[async_trait]
pub trait CollectionsProvider: Send + Sync {
    /// Fetch the ordered collection listing for `address`.
    async fn fetch_collections(&self, address: &Address) -> Result<Vec<CollectionEntry>, FetchError>;
}

/// Remote source of investment/trade statistics.
#[async_trait]
pub trait InvestmentsProvider: Send + Sync {
    /// Compute statistics for `address`, using `connection` for on-chain reads.
    async fn fetch_investment_stats(
        &self,
        address: &Address,
        connection: &ChainConnection,
    ) -> Result<InvestmentStats, FetchError>;
}

/// Injected wallet capability.
#[async_trait]
pub trait WalletService: Send + Sync {
    /// Whether a wallet is present at all.
    fn is_available(&self) -> bool;

    /// JSON-RPC endpoint the wallet exposes for read calls.
    fn rpc_url(&self) -> Option<&str>;

    /// Ask the wallet for the current address.
    ///
    /// Fails with [`WalletError::Unavailable`] when no wallet is present and
    /// [`WalletError::Rejected`] when the user declines.
    async fn request_address(&self) -> Result<Address, WalletError>;
}

/// Durable string key-value storage.
///
/// Reads never fail: a backend that cannot produce a value reports it absent.
pub trait KeyValueStore: Send + Sync {
    fn read_string(&self, key: &str) -> Option<String>;

    fn write_string(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Navigation history integration.
pub trait History: Send + Sync {
    /// Record a new navigation entry together with its URL.
    fn push(&self, entry: NavigationEntry, url: &str);
}

/// The parts of the page the session controller drives directly.
pub trait DashboardView: Send + Sync {
    /// Show or hide the stats and collection panels together.
    fn set_panels_visible(&self, visible: bool);

    /// Echo the address being displayed into the manual address input.
    fn set_address_input(&self, value: &str);
}

/// Fire-and-forget analytics sink.
pub trait Analytics: Send + Sync {
    fn wallet_exists(&self);

    fn wallet_connected(&self, address: &Address);

    fn wallet_exists_not_connected(&self);

    fn init_from_query_param(&self, address: &Address);
}
