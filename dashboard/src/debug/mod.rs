//! # Debugging and Tracing Infrastructure
//!
//! ## Features
//!
//! - **File-based logging**: Structured logs to `logs/dashboard.log` (daily rotation)
//! - **Trace ids**: one per address resolution, carried on a `tracing` span
//! - **Async task tracking**: spawn/complete/duration logging for every fetch task
//!
//! ## Usage
//!
//! ```rust,ignore
//! // Initialize at startup
//! debug::init();
//!
//! // Log with structured fields
//! tracing::info!(address = %address, container = "collections", "Resolution applied");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `dashboard=debug,info`)
//! - `DASHBOARD_LOG_DIR`: Log directory (default: `logs`)
//! - `DASHBOARD_LOG_STDERR`: Mirror logs to stderr (1=on, 0=off)

pub mod config;
pub mod logger;
pub mod task_tracker;
pub mod trace_context;

pub use config::DebugConfig;
pub use logger::init as init_logger;
pub use task_tracker::{active_task_count, spawn_tracked};
pub use trace_context::{new_trace_id, resolution_span};

/// Initialize the debugging system
///
/// Call this at application startup, before any other operations.
pub fn init() {
    init_logger();
}
