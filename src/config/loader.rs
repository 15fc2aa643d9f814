//! Configuration and trust-root loading from disk.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::ledger::ValidatorVerifier;

/// Error type for configuration loading and network selection.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
    UnsupportedNetwork(String),
    UnknownNetwork(String),
    InvalidPort(u32),
    MissingHost,
    MissingPort,
    MissingTrustRoot,
    MissingFaucet,
    TrustRoot(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            ConfigError::UnsupportedNetwork(name) => {
                write!(f, "Network '{}' is not supported currently", name)
            }
            ConfigError::UnknownNetwork(name) => write!(f, "Unknown network: {}", name),
            ConfigError::InvalidPort(port) => {
                write!(f, "port must be between 1 and 65535, got {}", port)
            }
            ConfigError::MissingHost => write!(f, "custom network requires network.host"),
            ConfigError::MissingPort => write!(f, "custom network requires network.port"),
            ConfigError::MissingTrustRoot => {
                write!(f, "network.validator_set_path is required")
            }
            ConfigError::MissingFaucet => write!(f, "no faucet configured for this network"),
            ConfigError::TrustRoot(msg) => write!(f, "Invalid validator set: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ClientConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[derive(Deserialize)]
struct ValidatorSetFile {
    validators: Vec<ValidatorEntry>,
}

#[derive(Deserialize)]
struct ValidatorEntry {
    id: String,
    /// Hex-encoded ed25519 public key.
    public_key: String,
}

/// Parse a validator set document.
///
/// ```toml
/// [[validators]]
/// id = "validator-0"
/// public_key = "<64 hex chars>"
/// ```
pub fn parse_validator_set(content: &str) -> Result<ValidatorVerifier, ConfigError> {
    let file: ValidatorSetFile = toml::from_str(content).map_err(ConfigError::Parse)?;
    if file.validators.is_empty() {
        return Err(ConfigError::TrustRoot("validator set is empty".to_string()));
    }

    let mut validators = Vec::with_capacity(file.validators.len());
    for entry in file.validators {
        let key = hex::decode(entry.public_key.trim_start_matches("0x"))
            .map_err(|e| ConfigError::TrustRoot(format!("{}: {}", entry.id, e)))?;
        let key: [u8; 32] = key.as_slice().try_into().map_err(|_| {
            ConfigError::TrustRoot(format!("{}: public key must be 32 bytes", entry.id))
        })?;
        validators.push((entry.id, key));
    }

    Ok(ValidatorVerifier::new(validators))
}

/// Load the trusted validator set from disk.
pub fn load_validator_set(path: &Path) -> Result<ValidatorVerifier, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let verifier = parse_validator_set(&content)?;
    tracing::info!(
        path = %path.display(),
        validators = verifier.len(),
        quorum = verifier.quorum(),
        "Validator set loaded"
    );
    Ok(verifier)
}
