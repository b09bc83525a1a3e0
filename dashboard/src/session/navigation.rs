//! History records and the URLs they are pushed with.

use serde::{Deserialize, Serialize};
use shared::Address;

/// URL pushed when the session follows the wallet rather than a typed address
pub const ROOT_URL: &str = "./";

/// State record stored with each history entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_address: Option<Address>,
}

impl NavigationEntry {
    /// Entry for the wallet-driven view.
    pub fn root() -> Self {
        Self { custom_address: None }
    }

    pub fn for_address(address: Address) -> Self {
        Self {
            custom_address: Some(address),
        }
    }
}

/// `?address=<value>` with the value percent-encoded.
pub fn address_url(address: &Address) -> String {
    format!("?address={}", urlencoding::encode(address.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_url_encodes_value() {
        let address = Address::parse("0xAbC").unwrap();
        assert_eq!(address_url(&address), "?address=0xAbC");

        let address = Address::parse("a/b&c=d").unwrap();
        assert_eq!(address_url(&address), "?address=a%2Fb%26c%3Dd");
    }

    #[test]
    fn test_entry_wire_shape() {
        let entry = NavigationEntry::for_address(Address::parse("0x1").unwrap());
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"customAddress":"0x1"}"#
        );
        assert_eq!(serde_json::to_string(&NavigationEntry::root()).unwrap(), "{}");
    }

    #[test]
    fn test_blank_stored_address_is_rejected() {
        assert!(serde_json::from_str::<NavigationEntry>(r#"{"customAddress":"  "}"#).is_err());

        let entry: NavigationEntry = serde_json::from_str(r#"{"customAddress":" 0x1 "}"#).unwrap();
        assert_eq!(entry.custom_address, Some(Address::parse("0x1").unwrap()));
    }
}
