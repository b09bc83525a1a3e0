//! # Services Module
//!
//! Production implementations of the collaborator traits in
//! [`crate::core::service`].
//!
//! ```text
//! services/
//! ├── api/          - HTTP providers (collections, trade events) and JSON-RPC
//! ├── wallet.rs     - RpcWallet: address disclosure over JSON-RPC
//! ├── storage.rs    - MemoryStore / FileStore key-value backends
//! ├── history.rs    - HistoryStack: in-memory navigation history
//! └── analytics.rs  - TracingAnalytics: analytics events as tracing events
//! ```
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  SessionController                   │
//! └──────┬───────────────┬────────────────┬──────────────┘
//!        │               │                │
//!        ▼               ▼                ▼
//!   ApiClient        RpcWallet       ChainConnection
//!   (HTTP/JSON)      (JSON-RPC)      (JSON-RPC, balance)
//!        │               │                │
//!        ▼               ▼                ▼
//!   /collections    eth_requestAccounts   eth_getBalance
//!   /events
//! ```

pub mod analytics;
pub mod api;
pub mod history;
pub mod storage;
pub mod wallet;

pub use analytics::TracingAnalytics;
pub use api::ApiClient;
pub use history::{HistoryRecord, HistoryStack};
pub use storage::{FileStore, MemoryStore};
pub use wallet::RpcWallet;
