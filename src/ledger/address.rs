//! Account addresses and access paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of an account address in bytes.
pub const ADDRESS_LENGTH: usize = 32;

/// Fixed-width account identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Create an address from raw bytes.
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Lowercase hex without prefix, as operators see it.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Errors from parsing a hex address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("address is not valid hex: {0}")]
    InvalidHex(String),

    #[error("address must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        let bytes: [u8; ADDRESS_LENGTH] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| AddressParseError::InvalidLength {
                    expected: ADDRESS_LENGTH,
                    actual: bytes.len(),
                })?;
        Ok(Self(bytes))
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

/// The association account, which mints coins on test networks.
pub fn association_address() -> Address {
    let mut bytes = [0u8; ADDRESS_LENGTH];
    bytes[ADDRESS_LENGTH - 4..].copy_from_slice(&[0x0a, 0x55, 0x0c, 0x18]);
    Address(bytes)
}

/// Key identifying a piece of state or an event stream under an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessPath {
    pub address: Address,
    pub path: Vec<u8>,
}

impl AccessPath {
    pub fn new(address: Address, path: Vec<u8>) -> Self {
        Self { address, path }
    }
}
