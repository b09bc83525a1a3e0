//! Trace IDs for correlating everything logged during one address resolution
//!
//! Each resolution gets a fresh id carried on a `tracing` span. Futures
//! spawned through [`super::spawn_tracked`] inherit the span that was current
//! when they were spawned, so late completions still log under the id of the
//! resolution that issued them.

use shared::Address;
use tracing::Span;
use uuid::Uuid;

/// Generate a new trace ID
pub fn new_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering the resolution of `address` (or of the wallet, when `None`)
pub fn resolution_span(origin: &'static str, address: Option<&Address>) -> Span {
    let trace_id = new_trace_id();
    match address {
        Some(address) => tracing::info_span!(
            "resolution",
            trace_id = %trace_id,
            origin = origin,
            address = %address
        ),
        None => tracing::info_span!("resolution", trace_id = %trace_id, origin = origin),
    }
}
