//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged between the dashboard core, its remote data
//! providers and its renderers.
//!
//! ## Module Organization
//!
//! - [`address`] - Opaque account identifier
//! - [`collection`] - Collection listings held by an account
//! - [`investment`] - Trades and aggregated investment statistics
//!
//! ## Serialization Format
//!
//! All DTOs use `serde_json`:
//!
//! - **Field naming**: snake_case (default serde behavior)
//! - **Optional fields**: Omitted when `None` using `#[serde(skip_serializing_if = "Option::is_none")]`
//! - **Enums**: Serialize to lowercase strings using `#[serde(rename_all = "lowercase")]`
//! - **Address**: Serialized as a bare string (`#[serde(transparent)]`)
//!
//! ## Example JSON
//!
//! ```text
//! {
//!   "slug": "cool-cats",
//!   "name": "Cool Cats",
//!   "owned_asset_count": 3,
//!   "stats": { "floor_price": 1.2 },
//!   "hidden": false
//! }
//! ```

pub mod address;
pub mod collection;
pub mod investment;

pub use address::*;
pub use collection::*;
pub use investment::*;
