//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration for the client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Admission-control endpoint and trust root.
    pub network: NetworkConfig,

    /// Defaults applied to built transactions.
    pub transaction: TransactionConfig,

    /// Confirmation polling settings.
    pub polling: PollingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Network selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Well-known network name ("testnet") or "custom".
    pub name: String,

    /// Admission-control host, required for "custom".
    pub host: Option<String>,

    /// Admission-control port, required for "custom".
    pub port: Option<u32>,

    /// Faucet host (test networks only).
    pub faucet_host: Option<String>,

    /// Path to the trusted validator set (TOML).
    pub validator_set_path: Option<PathBuf>,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "testnet".to_string(),
            host: None,
            port: None,
            faucet_host: None,
            validator_set_path: None,
            rpc_timeout_secs: 10,
        }
    }
}

/// Transaction defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactionConfig {
    /// Maximum gas units a transaction may consume.
    pub max_gas_amount: u64,

    /// Price per gas unit in micro-coins.
    pub gas_unit_price: u64,

    /// Seconds from now until a transaction expires.
    pub expiration_secs: u64,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            max_gas_amount: 140_000,
            gas_unit_price: 0,
            expiration_secs: 100,
        }
    }
}

/// Confirmation polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Delay before each ledger poll in milliseconds.
    pub interval_ms: u64,

    /// Number of polls before giving up.
    pub max_attempts: u32,
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1_000,
            max_attempts: 50,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
