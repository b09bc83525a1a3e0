//! # Shared Data Transfer Objects Library
//!
//! Types shared between the dashboard core and anything that renders or
//! serves its data.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::address`]**: Account address newtype
//!   - **[`dto::collection`]**: Collection listings with the local `hidden` flag
//!   - **[`dto::investment`]**: Trades and investment statistics
//! - **[`utils`]**: Shared display helpers
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::format_eth`]**: Format ETH amounts
//!
//! ## Usage
//!
//! ```rust
//! use shared::{Address, CollectionEntry};
//! use shared::utils::truncate_address;
//!
//! let address: Address = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F".parse().unwrap();
//! let entry = CollectionEntry::new("cool-cats");
//!
//! assert_eq!(truncate_address(address.as_str()), "0x71...976F");
//! assert!(!entry.hidden);
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where all exports are public API
pub use dto::*;
pub use utils::*;
