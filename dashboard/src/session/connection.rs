//! # Chain Connection
//!
//! Read-only JSON-RPC handle shared by every fetch of the session.
//!
//! A [`ConnectionSlot`] hands out the same [`ChainConnection`] for as long as
//! the connectivity kind stays the same. When the kind flips (a wallet
//! appears or disappears) the old handle is dropped and a new one is created
//! against the other endpoint.

use parking_lot::Mutex;
use reqwest::Client;
use serde_json::json;
use shared::Address;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::core::error::FetchError;
use crate::services::api::rpc;

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// How the session reaches the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    /// Through the injected wallet's RPC endpoint
    Injected,
    /// Directly against the configured public node
    Network,
}

struct ConnectionInner {
    id: u64,
    kind: ConnectionKind,
    endpoint: String,
    client: Client,
}

/// Cheaply cloneable connection handle.
#[derive(Clone)]
pub struct ChainConnection {
    inner: Arc<ConnectionInner>,
}

impl std::fmt::Debug for ChainConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainConnection")
            .field("id", &self.inner.id)
            .field("kind", &self.inner.kind)
            .field("endpoint", &self.inner.endpoint)
            .finish()
    }
}

impl ChainConnection {
    pub fn new(kind: ConnectionKind, endpoint: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            inner: Arc::new(ConnectionInner {
                id: NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
                kind,
                endpoint: endpoint.into(),
                client,
            }),
        }
    }

    /// Process-unique id, stable across clones
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn kind(&self) -> ConnectionKind {
        self.inner.kind
    }

    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Native balance of `address` in ETH.
    pub async fn get_balance(&self, address: &Address) -> Result<f64, FetchError> {
        let quantity: String = rpc::call(
            &self.inner.client,
            &self.inner.endpoint,
            "eth_getBalance",
            json!([address.as_str(), "latest"]),
        )
        .await
        .map_err(|e| FetchError::Provider(e.to_string()))?;

        rpc::wei_hex_to_eth(&quantity)
            .ok_or_else(|| FetchError::Provider(format!("invalid balance quantity: {}", quantity)))
    }
}

/// Holder of the session's single connection.
#[derive(Default)]
pub struct ConnectionSlot {
    current: Mutex<Option<ChainConnection>>,
}

impl ConnectionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connection of `kind`, reusing the held one when the kind matches.
    pub fn acquire(&self, kind: ConnectionKind, endpoint: &str) -> ChainConnection {
        let mut slot = self.current.lock();
        if let Some(existing) = slot.as_ref().filter(|c| c.kind() == kind) {
            return existing.clone();
        }

        let connection = ChainConnection::new(kind, endpoint);
        info!(
            connection_id = connection.id(),
            kind = ?kind,
            endpoint,
            replaced = slot.is_some(),
            "Chain connection created"
        );
        *slot = Some(connection.clone());
        connection
    }

    pub fn current(&self) -> Option<ChainConnection> {
        self.current.lock().clone()
    }
}
