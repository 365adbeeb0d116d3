//! Chain configuration.
//!
//! Chains are listed in a TOML file as `[[chains]]` tables. Without an
//! explicit name the first entry is used.

use std::{path::Path, str::FromStr};

use alloy::{
    primitives::Address,
    providers::{Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use serde::Deserialize;
use thiserror::Error;

/// Path used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Validation(String),
    #[error("no chain named `{0}` in config")]
    UnknownChain(String),
    #[error("chain `{0}` has an invalid private key")]
    InvalidKey(String),
    #[error("chain `{chain}` has an invalid rpc url `{url}`")]
    InvalidUrl { chain: String, url: String },
    #[error("chain `{chain}` expected chain id {expected}, endpoint reports {actual}")]
    ChainMismatch {
        chain: String,
        expected: u64,
        actual: u64,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // Display carries the line and column.
        ConfigError::Parse(err.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chains: Vec<ChainConfig>,
}

/// One network entry.
#[derive(Clone, Deserialize)]
pub struct ChainConfig {
    pub name: String,
    /// JSON-RPC endpoint.
    pub url: String,
    pub private_key: String,
    /// Axelar gateway the deployed contract is bound to.
    pub gateway: Address,
    /// Checked against `eth_chainId` when set.
    #[serde(default)]
    pub chain_id: Option<u64>,
    /// Second constructor argument. Zero when unset.
    #[serde(default)]
    pub gas_service: Option<Address>,
}

// Keeps the private key out of logs and error reports.
impl std::fmt::Debug for ChainConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainConfig")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("gateway", &self.gateway)
            .field("chain_id", &self.chain_id)
            .field("gas_service", &self.gas_service)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }

    /// Returns the named chain, or the first one when `name` is `None`.
    pub fn chain(&self, name: Option<&str>) -> Result<&ChainConfig, ConfigError> {
        match name {
            Some(name) => self
                .chains
                .iter()
                .find(|chain| chain.name == name)
                .ok_or_else(|| ConfigError::UnknownChain(name.to_string())),
            None => self
                .chains
                .first()
                .ok_or_else(|| ConfigError::Validation("no chains configured".to_string())),
        }
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        if config.chains.is_empty() {
            return Err(ConfigError::Validation("no chains configured".to_string()));
        }
        for chain in &config.chains {
            if chain.url.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "chain `{}` has an empty url",
                    chain.name
                )));
            }
        }
        Ok(config)
    }
}

impl ChainConfig {
    pub fn signer(&self) -> Result<PrivateKeySigner, ConfigError> {
        self.private_key
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidKey(self.name.clone()))
    }

    pub fn gas_service(&self) -> Address {
        self.gas_service.unwrap_or(Address::ZERO)
    }

    /// Builds a provider that signs with `signer` and fills nonce, gas and
    /// chain id. No request is sent until the provider is used.
    pub fn connect(&self, signer: PrivateKeySigner) -> Result<impl Provider + Clone, ConfigError> {
        let url: Url = self.url.parse().map_err(|_| ConfigError::InvalidUrl {
            chain: self.name.clone(),
            url: self.url.clone(),
        })?;

        Ok(ProviderBuilder::new().wallet(signer).connect_http(url))
    }

    pub async fn ensure_chain_id<P: Provider>(&self, provider: &P) -> eyre::Result<()> {
        let Some(expected) = self.chain_id else {
            return Ok(());
        };

        let actual = provider.get_chain_id().await?;
        if actual != expected {
            return Err(ConfigError::ChainMismatch {
                chain: self.name.clone(),
                expected,
                actual,
            }
            .into());
        }

        tracing::debug!(chain = %self.name, chain_id = actual, "chain id matches");
        Ok(())
    }
}
