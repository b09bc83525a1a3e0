use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::address::Address;

/// Direction of a trade from the account's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Bought,
    Sold,
}

/// A single completed sale involving the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub collection_slug: String,
    pub token_id: String,
    pub side: TradeSide,
    /// Sale price in ETH
    pub price: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

/// Aggregated trading statistics for an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentStats {
    pub address: Address,
    /// Total ETH paid for purchases
    pub total_spent: f64,
    /// Total ETH received from sales
    pub total_received: f64,
    pub bought_count: u64,
    pub sold_count: u64,
    /// Native balance of the account in ETH, when the connection could report it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_trade_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_trade_at: Option<DateTime<Utc>>,
}

impl InvestmentStats {
    /// Fold a trade list into totals.
    ///
    /// Trades may arrive in any order; first/last timestamps are computed,
    /// not taken from list position.
    pub fn from_trades(address: Address, trades: &[Trade], wallet_balance: Option<f64>) -> Self {
        let mut stats = Self {
            address,
            total_spent: 0.0,
            total_received: 0.0,
            bought_count: 0,
            sold_count: 0,
            wallet_balance,
            first_trade_at: None,
            last_trade_at: None,
        };

        for trade in trades {
            match trade.side {
                TradeSide::Bought => {
                    stats.total_spent += trade.price;
                    stats.bought_count += 1;
                }
                TradeSide::Sold => {
                    stats.total_received += trade.price;
                    stats.sold_count += 1;
                }
            }
            stats.first_trade_at = Some(match stats.first_trade_at {
                Some(first) => first.min(trade.timestamp),
                None => trade.timestamp,
            });
            stats.last_trade_at = Some(match stats.last_trade_at {
                Some(last) => last.max(trade.timestamp),
                None => trade.timestamp,
            });
        }

        stats
    }

    /// Received minus spent.
    pub fn realized_profit(&self) -> f64 {
        self.total_received - self.total_spent
    }

    pub fn trade_count(&self) -> u64 {
        self.bought_count + self.sold_count
    }
}
