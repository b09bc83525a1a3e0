//! # Wallet Service
//!
//! Wallet capability reached over JSON-RPC.
//!
//! The wallet is considered present when an endpoint is configured. Address
//! disclosure uses `eth_requestAccounts`; a refusal (EIP-1193 code 4001) or
//! an empty account list is reported as [`WalletError::Rejected`].

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use shared::Address;
use std::time::Duration;

use super::api::rpc::{self, RpcError, USER_REJECTED};
use crate::core::error::WalletError;
use crate::core::service::WalletService;

/// Prompting the user can take a while
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct RpcWallet {
    endpoint: Option<String>,
    client: Client,
}

impl RpcWallet {
    pub fn new(endpoint: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { endpoint, client }
    }
}

#[async_trait]
impl WalletService for RpcWallet {
    fn is_available(&self) -> bool {
        self.endpoint.is_some()
    }

    fn rpc_url(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    async fn request_address(&self) -> Result<Address, WalletError> {
        let endpoint = self.endpoint.as_deref().ok_or(WalletError::Unavailable)?;
        tracing::info!(endpoint, "Requesting wallet accounts");

        let accounts: Vec<String> = rpc::call(&self.client, endpoint, "eth_requestAccounts", json!([]))
            .await
            .map_err(|e| match e {
                RpcError::Remote {
                    code: USER_REJECTED,
                    message,
                } => WalletError::Rejected(message),
                other => WalletError::Rpc(other.to_string()),
            })?;

        let first = accounts
            .into_iter()
            .next()
            .ok_or_else(|| WalletError::Rejected("wallet exposed no accounts".to_string()))?;
        Address::parse(&first).map_err(|e| WalletError::Rpc(e.to_string()))
    }
}
