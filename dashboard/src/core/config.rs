//! # Dashboard Configuration
//!
//! Runtime configuration loaded from environment variables. The binary calls
//! `dotenvy::dotenv()` first, so a `.env` file next to it is honoured.
//!
//! Configuration is validated once at startup to fail fast if misconfigured.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use super::error::{AppError, Result};

const DEFAULT_COLLECTIONS_URL: &str = "https://api.opensea.io/api/v1";
const DEFAULT_TRADES_URL: &str = "https://api.opensea.io/api/v1";
const DEFAULT_NETWORK_RPC_URL: &str = "https://cloudflare-eth.com";
const DEFAULT_STORAGE_PATH: &str = "data/dashboard-storage.json";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct DashboardConfig {
    /// Base URL of the collections listing API
    pub collections_url: String,

    /// Base URL of the trade events API
    pub trades_url: String,

    /// JSON-RPC endpoint of an injected wallet.
    ///
    /// When set, the session treats a browser-style wallet as present and
    /// asks it for the active address.
    pub wallet_rpc_url: Option<String>,

    /// Read-only JSON-RPC endpoint used when no wallet is present
    pub network_rpc_url: String,

    /// Upper bound on every data fetch.
    ///
    /// Valid range: 1-300 seconds
    pub fetch_timeout: Duration,

    /// File backing the persisted key-value store
    pub storage_path: PathBuf,

    /// Optional API key sent as `X-API-KEY` to the data providers
    pub api_key: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            collections_url: DEFAULT_COLLECTIONS_URL.to_string(),
            trades_url: DEFAULT_TRADES_URL.to_string(),
            wallet_rpc_url: None,
            network_rpc_url: DEFAULT_NETWORK_RPC_URL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            api_key: None,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let fetch_timeout_secs = match env::var("DASHBOARD_FETCH_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::Config(format!("DASHBOARD_FETCH_TIMEOUT_SECS must be a valid number: {}", e))
            })?,
            Err(_) => DEFAULT_FETCH_TIMEOUT_SECS,
        };

        Ok(Self {
            collections_url: env::var("DASHBOARD_COLLECTIONS_URL")
                .unwrap_or_else(|_| DEFAULT_COLLECTIONS_URL.to_string()),
            trades_url: env::var("DASHBOARD_TRADES_URL")
                .unwrap_or_else(|_| DEFAULT_TRADES_URL.to_string()),
            wallet_rpc_url: non_empty_var("DASHBOARD_WALLET_RPC_URL"),
            network_rpc_url: env::var("DASHBOARD_NETWORK_RPC_URL")
                .unwrap_or_else(|_| DEFAULT_NETWORK_RPC_URL.to_string()),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            storage_path: env::var("DASHBOARD_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_PATH)),
            api_key: non_empty_var("DASHBOARD_API_KEY"),
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        let secs = self.fetch_timeout.as_secs();
        if !(1..=300).contains(&secs) {
            return Err(AppError::Config(
                "DASHBOARD_FETCH_TIMEOUT_SECS must be between 1 and 300".to_string(),
            ));
        }

        for (name, url) in [
            ("DASHBOARD_COLLECTIONS_URL", &self.collections_url),
            ("DASHBOARD_TRADES_URL", &self.trades_url),
            ("DASHBOARD_NETWORK_RPC_URL", &self.network_rpc_url),
        ] {
            if url.trim().is_empty() {
                return Err(AppError::Config(format!("{} must not be empty", name)));
            }
        }

        Ok(())
    }

    /// Load and validate in one step.
    pub fn load() -> Result<Self> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.wallet_rpc_url.is_none());
        assert_eq!(config.fetch_timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_validate_rejects_timeout_out_of_range() {
        let config = DashboardConfig {
            fetch_timeout: Duration::from_secs(0),
            ..DashboardConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let config = DashboardConfig {
            fetch_timeout: Duration::from_secs(301),
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_url() {
        let config = DashboardConfig {
            collections_url: "  ".to_string(),
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
