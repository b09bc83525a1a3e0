//! Analytics sink that emits structured `tracing` events on the `analytics`
//! target. Route that target anywhere with `RUST_LOG=analytics=info`.

use shared::Address;

use crate::core::service::Analytics;

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn wallet_exists(&self) {
        tracing::info!(target: "analytics", event = "wallet_exists");
    }

    fn wallet_connected(&self, address: &Address) {
        tracing::info!(target: "analytics", event = "wallet_connected", address = %address);
    }

    fn wallet_exists_not_connected(&self) {
        tracing::info!(target: "analytics", event = "wallet_exists_not_connected");
    }

    fn init_from_query_param(&self, address: &Address) {
        tracing::info!(target: "analytics", event = "init_from_query_param", address = %address);
    }
}
