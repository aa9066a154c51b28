//! Configuration loaded from environment variables
//!
//! Mirrors the original hardhat network table: the origin network falls back
//! to the ShimmerEVM testnet entry when `ORIGIN_NODE_URL` is not set.

use alloy::primitives::{Address, U256};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Error;

const SHIMMER_EVM_TESTNET_URL: &str = "https://json-rpc.evm.testnet.shimmer.network";
const SHIMMER_EVM_TESTNET_CHAIN_ID: u64 = 1073;

/// Main configuration for a deployment run
#[derive(Debug, Clone)]
pub struct Config {
    pub token: TokenConfig,
    /// Recipient of the local and cross-chain transfers
    pub target_address: Address,
    pub origin: NetworkConfig,
    pub target: NetworkConfig,
    pub sync: SyncConfig,
    /// Hardhat artifact carrying the controller's creation bytecode
    pub artifact_path: PathBuf,
}

/// Native-token parameters for the foundry
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub max_supply: U256,
}

/// One EVM network endpoint with signing credentials
#[derive(Clone, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub private_key: String,
}

/// Custom Debug that redacts private_key to prevent accidental log leakage.
impl fmt::Debug for NetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkConfig")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Cross-chain settling and per-call timeout knobs
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_settle_poll_interval")]
    pub settle_poll_interval_ms: u64,
    #[serde(default = "default_settle_timeout")]
    pub settle_timeout_ms: u64,
    #[serde(default = "default_rpc_timeout")]
    pub rpc_timeout_ms: u64,
}

fn default_settle_poll_interval() -> u64 {
    1000
}

fn default_settle_timeout() -> u64 {
    30_000
}

fn default_rpc_timeout() -> u64 {
    60_000
}

fn default_artifact_path() -> PathBuf {
    PathBuf::from("artifacts/NativeTokenController.json")
}

fn require(name: &str) -> Result<String, Error> {
    env::var(name).map_err(|_| {
        Error::Configuration(format!("{name} environment variable is required"))
    })
}

fn parse_u64(name: &str, raw: &str) -> Result<u64, Error> {
    raw.parse()
        .map_err(|_| Error::Configuration(format!("{name} must be a valid integer, got {raw:?}")))
}

impl Config {
    /// Load configuration from environment variables.
    /// Loads the .env file if present, then reads from the environment.
    pub fn load() -> Result<Self, Error> {
        Self::load_from_file(".env")
    }

    /// Load from a specific .env file path
    pub fn load_from_file(path: &str) -> Result<Self, Error> {
        if Path::new(path).exists() {
            dotenvy::from_filename(path).map_err(|e| {
                Error::Configuration(format!("failed to load env file {path}: {e}"))
            })?;
        }
        Self::load_from_env()
    }

    fn load_from_env() -> Result<Self, Error> {
        let token = TokenConfig {
            name: require("TOKEN_NAME")?,
            symbol: require("TOKEN_SYMBOL")?,
            decimals: require("TOKEN_DECIMALS")?.parse().map_err(|_| {
                Error::Configuration("TOKEN_DECIMALS must be a valid u8".to_string())
            })?,
            max_supply: require("TOKEN_SUPPLY")?.parse().map_err(|_| {
                Error::Configuration("TOKEN_SUPPLY must be a valid unsigned integer".to_string())
            })?,
        };

        let target_address: Address = require("TARGET_ADDRESS")?.parse().map_err(|_| {
            Error::Configuration("TARGET_ADDRESS must be a valid 0x address".to_string())
        })?;

        // Origin network: explicit ORIGIN_* vars, or the ShimmerEVM testnet
        // entry (the original deployment network) when they are absent.
        let origin = match env::var("ORIGIN_NODE_URL") {
            Ok(rpc_url) => NetworkConfig {
                rpc_url,
                chain_id: parse_u64("ORIGIN_NETWORK_ID", &require("ORIGIN_NETWORK_ID")?)?,
                private_key: require("DEPLOYER_PRIVATE_KEY")?,
            },
            Err(_) => NetworkConfig {
                rpc_url: env::var("SHIMMEREVM_JSONRPC")
                    .unwrap_or_else(|_| SHIMMER_EVM_TESTNET_URL.to_string()),
                chain_id: match env::var("SHIMMEREVM_CHAINID") {
                    Ok(raw) => parse_u64("SHIMMEREVM_CHAINID", &raw)?,
                    Err(_) => SHIMMER_EVM_TESTNET_CHAIN_ID,
                },
                private_key: require("PRIVATE_KEY")?,
            },
        };

        let target = NetworkConfig {
            rpc_url: require("TARGET_NODE_URL")?,
            chain_id: parse_u64("TARGET_NETWORK_ID", &require("TARGET_NETWORK_ID")?)?,
            private_key: env::var("DEPLOYER_PRIVATE_KEY")
                .unwrap_or_else(|_| origin.private_key.clone()),
        };

        let sync = SyncConfig {
            settle_poll_interval_ms: env::var("SETTLE_POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_settle_poll_interval),
            settle_timeout_ms: env::var("SETTLE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_settle_timeout),
            rpc_timeout_ms: env::var("RPC_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_rpc_timeout),
        };

        let artifact_path = env::var("CONTROLLER_ARTIFACT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_artifact_path());

        let config = Config {
            token,
            target_address,
            origin,
            target,
            sync,
            artifact_path,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Error> {
        if self.token.name.is_empty() {
            return Err(Error::Configuration("token.name cannot be empty".to_string()));
        }

        if self.token.symbol.is_empty() {
            return Err(Error::Configuration(
                "token.symbol cannot be empty".to_string(),
            ));
        }

        if self.token.max_supply.is_zero() {
            return Err(Error::Configuration(
                "token.max_supply must be greater than zero".to_string(),
            ));
        }

        for (label, network) in [("origin", &self.origin), ("target", &self.target)] {
            if network.rpc_url.is_empty() {
                return Err(Error::Configuration(format!(
                    "{label}.rpc_url cannot be empty"
                )));
            }

            if network.private_key.len() != 66 || !network.private_key.starts_with("0x") {
                return Err(Error::Configuration(format!(
                    "{label}.private_key must be 66 chars (0x + 64 hex chars)"
                )));
            }
        }

        if self.sync.settle_poll_interval_ms == 0 {
            return Err(Error::Configuration(
                "sync.settle_poll_interval_ms must be greater than zero".to_string(),
            ));
        }

        if self.sync.settle_timeout_ms < self.sync.settle_poll_interval_ms {
            return Err(Error::Configuration(
                "sync.settle_timeout_ms cannot be shorter than the poll interval".to_string(),
            ));
        }

        Ok(())
    }
}
