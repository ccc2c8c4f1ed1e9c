use std::str::FromStr;

use tracing::warn;

use crate::error::{Result, StateError};
use crate::settings::TRANSACTION_TTL_DEFAULT_SECS;
use crate::token::{MAINNET_CHAIN_ID, Token};

pub const ENV_CHAIN_ID: &str = "SWAP_CHAIN_ID";
pub const ENV_TRANSACTION_TTL_DEFAULT_SECS: &str = "SWAP_TRANSACTION_TTL_DEFAULT_SECS";

#[derive(Clone, Debug, PartialEq)]
pub struct FormConfig {
    /// Chain whose native currency seeds the input side of a fresh form.
    pub chain_id: u64,

    /// Deadline (seconds) applied to submitted transactions when the user
    /// has not set one.
    pub transaction_ttl_default_secs: u32,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            chain_id: MAINNET_CHAIN_ID,
            transaction_ttl_default_secs: TRANSACTION_TTL_DEFAULT_SECS,
        }
    }
}

impl FormConfig {
    /// Reads overrides from the process environment.
    ///
    /// Unset variables keep their defaults; unparsable ones are logged and
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`FormConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            chain_id: parse_or_default(&lookup, ENV_CHAIN_ID, defaults.chain_id),
            transaction_ttl_default_secs: parse_or_default(
                &lookup,
                ENV_TRANSACTION_TTL_DEFAULT_SECS,
                defaults.transaction_ttl_default_secs,
            ),
        }
    }

    /// Token placed on the input side of a fresh form.
    pub fn default_input_token(&self) -> Token {
        Token::native(self.chain_id)
    }
}

fn parse_or_default<T, F>(lookup: &F, key: &'static str, default: T) -> T
where
    T: FromStr + Copy,
    F: Fn(&str) -> Option<String>,
{
    match parse_var(lookup, key) {
        Ok(Some(v)) => v,
        Ok(None) => default,
        Err(e) => {
            warn!(error = %e, "falling back to default");
            default
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };

    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| StateError::InvalidConfig { key, value: raw })
}
