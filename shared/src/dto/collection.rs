use serde::{Deserialize, Serialize};

/// Market statistics attached to a collection listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionStats {
    /// Current floor price in ETH
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_price: Option<f64>,
    /// Average sale price over the last 24h in ETH
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_day_average_price: Option<f64>,
    /// Traded volume over the last 7 days in ETH
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seven_day_volume: Option<f64>,
}

/// A collection the account holds at least one item of.
///
/// `hidden` never comes from the remote provider: it is merged in from the
/// per-address override set when the listing is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEntry {
    /// Unique collection key
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Number of items from this collection held by the account
    pub owned_asset_count: u64,
    #[serde(default)]
    pub stats: CollectionStats,
    #[serde(default)]
    pub hidden: bool,
}

impl CollectionEntry {
    /// Minimal entry with only a slug, mostly useful for tests and fixtures.
    pub fn new(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            name: slug.clone(),
            slug,
            image_url: None,
            owned_asset_count: 0,
            stats: CollectionStats::default(),
            hidden: false,
        }
    }

    /// Estimated value of the held items at floor price.
    pub fn floor_value(&self) -> Option<f64> {
        self.stats
            .floor_price
            .map(|floor| floor * self.owned_asset_count as f64)
    }
}
