//! # Trade Events Endpoint
//!
//! `GET {base}/events?account_address=<address>&event_type=successful`
//!
//! Successful sale events are folded into [`InvestmentStats`] together with
//! the account's native balance, read over the session's chain connection.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use shared::{Address, InvestmentStats, Trade, TradeSide};

use super::client::ApiClient;
use crate::core::error::FetchError;
use crate::session::ChainConnection;

const DEFAULT_DECIMALS: i32 = 18;

/// Fetch trades and balance for `address` and aggregate them.
///
/// A balance that cannot be read is logged and left out; failing trades
/// fail the whole fetch.
#[tracing::instrument(skip(client, address, connection), fields(address = %address, connection_id = connection.id()))]
pub async fn get_investment_stats(
    client: &ApiClient,
    address: &Address,
    connection: &ChainConnection,
) -> Result<InvestmentStats, FetchError> {
    let (trades, balance) = tokio::join!(get_trades(client, address), connection.get_balance(address));
    let trades = trades?;

    let balance = match balance {
        Ok(balance) => Some(balance),
        Err(e) => {
            tracing::warn!(error = %e, "Wallet balance unavailable");
            None
        }
    };

    let stats = InvestmentStats::from_trades(address.clone(), &trades, balance);
    tracing::debug!(
        trades = stats.trade_count(),
        realized_profit = stats.realized_profit(),
        "Investment stats computed"
    );
    Ok(stats)
}

/// Successful sales involving `address`, as seen from its side.
pub async fn get_trades(client: &ApiClient, address: &Address) -> Result<Vec<Trade>, FetchError> {
    let url = format!(
        "{}/events?account_address={}&event_type=successful",
        client.trades_url(),
        urlencoding::encode(address.as_str())
    );

    let response = client.get(&url).send().await.map_err(|e| {
        tracing::error!(error = %e, "Trade events network error");
        FetchError::Provider(format!("Network error: {}", e))
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "Trade events fetch failed");
        return Err(FetchError::Provider(format!("Failed to fetch trade events: {}", status)));
    }

    let page = response.json::<WireEventPage>().await.map_err(|e| {
        tracing::error!(error = %e, "Trade events parse error");
        FetchError::Provider(format!("Failed to parse response: {}", e))
    })?;

    Ok(trades_for(address, page.asset_events))
}

fn trades_for(address: &Address, events: Vec<WireEvent>) -> Vec<Trade> {
    events
        .into_iter()
        .filter_map(|event| {
            let trade = event.into_trade(address);
            if trade.is_none() {
                tracing::trace!("Skipping event not involving the account");
            }
            trade
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct WireEventPage {
    #[serde(default)]
    asset_events: Vec<WireEvent>,
}

#[derive(Debug, Deserialize)]
struct WireEvent {
    total_price: Option<String>,
    #[serde(default)]
    payment_token: Option<WirePaymentToken>,
    #[serde(default)]
    seller: Option<WireAccount>,
    #[serde(default)]
    winner_account: Option<WireAccount>,
    #[serde(default)]
    asset: Option<WireAsset>,
    created_date: Option<String>,
    #[serde(default)]
    transaction: Option<WireTransaction>,
}

#[derive(Debug, Deserialize)]
struct WirePaymentToken {
    decimals: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct WireAccount {
    address: String,
}

#[derive(Debug, Deserialize)]
struct WireAsset {
    token_id: Option<String>,
    collection: Option<WireAssetCollection>,
}

#[derive(Debug, Deserialize)]
struct WireAssetCollection {
    slug: String,
}

#[derive(Debug, Deserialize)]
struct WireTransaction {
    transaction_hash: Option<String>,
}

impl WireEvent {
    fn into_trade(self, address: &Address) -> Option<Trade> {
        let is = |account: &Option<WireAccount>| {
            account
                .as_ref()
                .is_some_and(|a| a.address.eq_ignore_ascii_case(address.as_str()))
        };
        let side = if is(&self.winner_account) {
            TradeSide::Bought
        } else if is(&self.seller) {
            TradeSide::Sold
        } else {
            return None;
        };

        let decimals = self
            .payment_token
            .and_then(|token| token.decimals)
            .unwrap_or(DEFAULT_DECIMALS);
        let price = base_units_to_decimal(self.total_price.as_deref()?, decimals)?;
        let timestamp = parse_timestamp(self.created_date.as_deref()?)?;
        let asset = self.asset?;

        Some(Trade {
            collection_slug: asset.collection?.slug,
            token_id: asset.token_id.unwrap_or_default(),
            side,
            price,
            timestamp,
            transaction_hash: self.transaction.and_then(|tx| tx.transaction_hash),
        })
    }
}

/// `"1500000000000000000"` with 18 decimals is `1.5`.
fn base_units_to_decimal(raw: &str, decimals: i32) -> Option<f64> {
    let units: f64 = raw.trim().parse().ok()?;
    Some(units / 10f64.powi(decimals))
}

/// Provider timestamps are UTC, with or without an explicit offset.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const PAGE: &str = r#"{
        "asset_events": [
            {
                "event_type": "successful",
                "total_price": "1500000000000000000",
                "payment_token": {"symbol": "ETH", "decimals": 18},
                "seller": {"address": "0xSELLER"},
                "winner_account": {"address": "0xabc"},
                "asset": {"token_id": "42", "collection": {"slug": "cool-cats"}},
                "created_date": "2022-01-05T10:30:00.123456",
                "transaction": {"transaction_hash": "0xhash1"}
            },
            {
                "total_price": "2000000",
                "payment_token": {"symbol": "USDC", "decimals": 6},
                "seller": {"address": "0xABC"},
                "winner_account": {"address": "0xbuyer"},
                "asset": {"token_id": "7", "collection": {"slug": "cool-cats"}},
                "created_date": "2022-02-01T00:00:00Z"
            },
            {
                "total_price": "1",
                "seller": {"address": "0xother"},
                "winner_account": {"address": "0xsomeone"},
                "asset": {"token_id": "1", "collection": {"slug": "x"}},
                "created_date": "2022-02-01T00:00:00"
            }
        ]
    }"#;

    #[test]
    fn test_events_map_to_trades_from_account_side() {
        let page: WireEventPage = serde_json::from_str(PAGE).unwrap();
        let address = Address::parse("0xabc").unwrap();
        let trades = trades_for(&address, page.asset_events);

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].side, TradeSide::Bought);
        assert_eq!(trades[0].price, 1.5);
        assert_eq!(trades[0].token_id, "42");
        assert_eq!(trades[0].transaction_hash.as_deref(), Some("0xhash1"));
        assert_eq!(trades[0].timestamp.day(), 5);
        assert_eq!(trades[0].timestamp.hour(), 10);

        assert_eq!(trades[1].side, TradeSide::Sold);
        assert_eq!(trades[1].price, 2.0);
        assert_eq!(trades[1].transaction_hash, None);

        let stats = InvestmentStats::from_trades(address, &trades, None);
        assert_eq!(stats.realized_profit(), 0.5);
    }

    #[test]
    fn test_event_with_unparseable_price_is_skipped() {
        let json = r#"{"asset_events": [{
            "total_price": "n/a",
            "winner_account": {"address": "0xabc"},
            "asset": {"token_id": "1", "collection": {"slug": "x"}},
            "created_date": "2022-01-01T00:00:00"
        }]}"#;
        let page: WireEventPage = serde_json::from_str(json).unwrap();
        let trades = trades_for(&Address::parse("0xabc").unwrap(), page.asset_events);
        assert!(trades.is_empty());
    }

    #[test]
    fn test_missing_events_key_is_empty_page() {
        let page: WireEventPage = serde_json::from_str("{}").unwrap();
        assert!(page.asset_events.is_empty());
    }
}
