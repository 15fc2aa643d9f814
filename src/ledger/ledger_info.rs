//! Signed ledger snapshots and the trusted validator set.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const LEDGER_INFO_DOMAIN: &[u8] = b"LIBRA::LedgerInfo";

/// One validator's signature over a ledger info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSignature {
    pub validator: String,
    pub signature: Vec<u8>,
}

/// Latest known ledger snapshot carried by every query response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerInfo {
    pub version: u64,
    pub timestamp_usecs: u64,
    pub signatures: Vec<ValidatorSignature>,
}

impl LedgerInfo {
    /// Ledger timestamp truncated to whole seconds.
    pub fn timestamp_secs(&self) -> u64 {
        self.timestamp_usecs / 1_000_000
    }

    /// Message validators sign for this snapshot.
    pub fn signing_message(&self) -> [u8; 32] {
        Sha256::new()
            .chain_update(LEDGER_INFO_DOMAIN)
            .chain_update(self.version.to_le_bytes())
            .chain_update(self.timestamp_usecs.to_le_bytes())
            .finalize()
            .into()
    }
}

/// Trusted validator quorum, fixed for a client's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorVerifier {
    validators: IndexMap<String, [u8; 32]>,
    quorum: usize,
}

impl ValidatorVerifier {
    /// Build from (id, ed25519 public key) pairs. Quorum is ⌊2n/3⌋ + 1.
    pub fn new(validators: impl IntoIterator<Item = (String, [u8; 32])>) -> Self {
        let validators: IndexMap<_, _> = validators.into_iter().collect();
        let quorum = validators.len() * 2 / 3 + 1;
        Self { validators, quorum }
    }

    pub fn public_key(&self, validator: &str) -> Option<&[u8; 32]> {
        self.validators.get(validator)
    }

    pub fn quorum(&self) -> usize {
        self.quorum
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}
