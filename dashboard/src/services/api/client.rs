//! # API Client
//!
//! HTTP client for the collections and trade-event providers.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use shared::{Address, CollectionEntry, InvestmentStats};

use crate::core::config::DashboardConfig;
use crate::core::error::FetchError;
use crate::core::service::{CollectionsProvider, InvestmentsProvider};
use crate::session::ChainConnection;

/// HTTP client shared by both data providers.
///
/// The underlying `reqwest::Client` keeps a connection pool, so one
/// instance serves every fetch of the session.
pub struct ApiClient {
    pub(crate) client: Client,
    collections_url: String,
    trades_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    /// Create a client from configuration.
    ///
    /// The request timeout matches the configured fetch timeout; the state
    /// containers apply the same bound again around the whole fetch.
    pub fn new(config: &DashboardConfig) -> Self {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            collections_url: config.collections_url.trim_end_matches('/').to_string(),
            trades_url: config.trades_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub(crate) fn collections_url(&self) -> &str {
        &self.collections_url
    }

    pub(crate) fn trades_url(&self) -> &str {
        &self.trades_url
    }

    /// GET with the API key header attached when configured.
    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url);
        match &self.api_key {
            Some(key) => request.header("X-API-KEY", key),
            None => request,
        }
    }
}

#[async_trait]
impl CollectionsProvider for ApiClient {
    async fn fetch_collections(&self, address: &Address) -> Result<Vec<CollectionEntry>, FetchError> {
        super::collections::get_collections(self, address).await
    }
}

#[async_trait]
impl InvestmentsProvider for ApiClient {
    async fn fetch_investment_stats(
        &self,
        address: &Address,
        connection: &ChainConnection,
    ) -> Result<InvestmentStats, FetchError> {
        super::investments::get_investment_stats(self, address, connection).await
    }
}
