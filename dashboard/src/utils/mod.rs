//! # Utilities
//!
//! Display formatting lives in the `shared` crate; this module only holds
//! helpers specific to the dashboard binary.

pub mod url;

pub use url::query_param;
