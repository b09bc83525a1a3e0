//! # Collections Endpoint
//!
//! `GET {base}/collections?asset_owner=<address>&offset=0&limit=300`

use serde::Deserialize;
use shared::{Address, CollectionEntry, CollectionStats};

use super::client::ApiClient;
use crate::core::error::FetchError;

/// Page size requested from the provider; also its maximum
pub const PAGE_LIMIT: usize = 300;

/// Fetch every collection `address` holds, in provider order.
#[tracing::instrument(skip(client, address), fields(address = %address))]
pub async fn get_collections(client: &ApiClient, address: &Address) -> Result<Vec<CollectionEntry>, FetchError> {
    let start = std::time::Instant::now();
    let url = format!(
        "{}/collections?asset_owner={}&offset=0&limit={}",
        client.collections_url(),
        urlencoding::encode(address.as_str()),
        PAGE_LIMIT
    );

    let response = client.get(&url).send().await.map_err(|e| {
        tracing::error!(error = %e, "Collections fetch network error");
        FetchError::Provider(format!("Network error: {}", e))
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "Collections fetch failed");
        return Err(FetchError::Provider(format!("Failed to fetch collections: {}", status)));
    }

    let wire = response.json::<Vec<WireCollection>>().await.map_err(|e| {
        tracing::error!(error = %e, "Collections response parse error");
        FetchError::Provider(format!("Failed to parse response: {}", e))
    })?;

    let entries: Vec<CollectionEntry> = wire.into_iter().map(CollectionEntry::from).collect();
    tracing::debug!(
        duration_ms = start.elapsed().as_millis(),
        count = entries.len(),
        "Collections fetched"
    );
    Ok(entries)
}

#[derive(Debug, Deserialize)]
struct WireCollection {
    slug: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    owned_asset_count: u64,
    #[serde(default)]
    stats: Option<WireStats>,
}

#[derive(Debug, Default, Deserialize)]
struct WireStats {
    #[serde(default)]
    floor_price: Option<f64>,
    #[serde(default)]
    one_day_average_price: Option<f64>,
    #[serde(default)]
    seven_day_volume: Option<f64>,
}

impl From<WireCollection> for CollectionEntry {
    fn from(wire: WireCollection) -> Self {
        let stats = wire.stats.unwrap_or_default();
        CollectionEntry {
            name: wire.name.unwrap_or_else(|| wire.slug.clone()),
            slug: wire.slug,
            image_url: wire.image_url.filter(|url| !url.is_empty()),
            owned_asset_count: wire.owned_asset_count,
            stats: CollectionStats {
                floor_price: stats.floor_price,
                one_day_average_price: stats.one_day_average_price,
                seven_day_volume: stats.seven_day_volume,
            },
            hidden: false,
        }
    }
}
