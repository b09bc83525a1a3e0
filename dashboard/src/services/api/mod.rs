//! # HTTP Providers
//!
//! - **client**: [`ApiClient`], shared `reqwest` client implementing both provider traits
//! - **collections**: collection listing for an owner
//! - **investments**: successful sale events folded into stats
//! - **rpc**: JSON-RPC calls used by the wallet and the chain connection

pub mod client;
pub mod collections;
pub mod investments;
pub mod rpc;

pub use client::ApiClient;
