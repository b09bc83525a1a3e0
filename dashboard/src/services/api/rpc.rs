//! # JSON-RPC
//!
//! Minimal Ethereum JSON-RPC 2.0 call used by the wallet and the chain
//! connection.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// EIP-1193 "user rejected the request"
pub const USER_REJECTED: i64 = 4001;

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("RPC error {code}: {message}")]
    Remote { code: i64, message: String },

    #[error("response carried neither result nor error")]
    Empty,
}

#[derive(Serialize)]
struct Request<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct Response<R> {
    result: Option<R>,
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: i64,
    message: String,
}

/// POST one call to `url` and decode its `result`.
pub async fn call<R: DeserializeOwned>(
    client: &Client,
    url: &str,
    method: &str,
    params: Value,
) -> Result<R, RpcError> {
    let request = Request {
        jsonrpc: "2.0",
        id: NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed),
        method,
        params,
    };

    let response = client
        .post(url)
        .json(&request)
        .send()
        .await
        .map_err(|e| RpcError::Transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .json::<Response<R>>()
        .await
        .map_err(|e| RpcError::Transport(format!("{} ({})", e, status)))?;

    decode(body)
}

fn decode<R>(body: Response<R>) -> Result<R, RpcError> {
    if let Some(error) = body.error {
        return Err(RpcError::Remote {
            code: error.code,
            message: error.message,
        });
    }
    body.result.ok_or(RpcError::Empty)
}

/// Hex wei quantity (`"0x..."`) to ETH.
pub fn wei_hex_to_eth(quantity: &str) -> Option<f64> {
    let digits = quantity.strip_prefix("0x").unwrap_or(quantity);
    if digits.is_empty() {
        return None;
    }
    let wei = u128::from_str_radix(digits, 16).ok()?;
    Some(wei as f64 / 1e18)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wei_hex_to_eth() {
        assert_eq!(wei_hex_to_eth("0x0"), Some(0.0));
        assert_eq!(wei_hex_to_eth("0xde0b6b3a7640000"), Some(1.0));
        assert_eq!(wei_hex_to_eth("0x"), None);
        assert_eq!(wei_hex_to_eth("0xnope"), None);
    }

    #[test]
    fn test_decode_prefers_error() {
        let body: Response<Vec<String>> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":4001,"message":"User rejected the request."}}"#,
        )
        .unwrap();
        match decode(body) {
            Err(RpcError::Remote { code, .. }) => assert_eq!(code, USER_REJECTED),
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }

        let body: Response<Vec<String>> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":["0xabc"]}"#).unwrap();
        assert_eq!(decode(body).unwrap(), vec!["0xabc".to_string()]);

        let body: Response<String> = serde_json::from_str(r#"{"jsonrpc":"2.0","id":1}"#).unwrap();
        assert!(matches!(decode(body), Err(RpcError::Empty)));
    }
}
