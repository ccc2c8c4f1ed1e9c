//! Token handles with canonical identity.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

pub const MAINNET_CHAIN_ID: u64 = 1;
pub const POLYGON_CHAIN_ID: u64 = 137;
pub const POLYGON_MUMBAI_CHAIN_ID: u64 = 80001;

/// Where a token lives on its chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "address", rename_all = "snake_case")]
pub enum TokenAddress {
    /// The chain's native currency.
    Native,
    /// Contract address, lowercase hex.
    Contract(String),
}

/// A token as selected in the form.
///
/// Two tokens are equal when they have the same chain and address; symbol
/// and decimals are display metadata and take no part in identity. The form
/// relies on this when it decides whether a selection swaps the two sides.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    chain_id: u64,
    address: TokenAddress,
    symbol: String,
    decimals: u8,
}

impl Token {
    /// Native currency of `chain_id`.
    pub fn native(chain_id: u64) -> Self {
        let symbol = match chain_id {
            POLYGON_CHAIN_ID | POLYGON_MUMBAI_CHAIN_ID => "MATIC",
            _ => "ETH",
        };
        Self {
            chain_id,
            address: TokenAddress::Native,
            symbol: symbol.to_string(),
            decimals: 18,
        }
    }

    /// Contract token. The address is normalized to lowercase so that
    /// checksummed and plain spellings compare equal.
    pub fn contract(
        chain_id: u64,
        address: impl AsRef<str>,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self {
            chain_id,
            address: TokenAddress::Contract(address.as_ref().to_ascii_lowercase()),
            symbol: symbol.into(),
            decimals,
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn address(&self) -> &TokenAddress {
        &self.address
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn is_native(&self) -> bool {
        self.address == TokenAddress::Native
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}
