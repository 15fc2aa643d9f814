//! Client error taxonomy and submission result types.

use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, TransactionConfig};
use crate::ledger::{Address, SubmitOutcome};
use crate::verification::VerifyError;

/// Why waiting for a transaction gave up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeoutKind {
    /// The ledger clock passed the transaction's expiration time.
    Expired {
        expiration_time: u64,
        ledger_time_secs: u64,
    },
    /// The local polling budget ran out first.
    AttemptsExhausted { attempts: u32 },
}

impl std::fmt::Display for TimeoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeoutKind::Expired {
                expiration_time,
                ledger_time_secs,
            } => write!(
                f,
                "transaction expired (expiration {}, ledger time {})",
                expiration_time, ledger_time_secs
            ),
            TimeoutKind::AttemptsExhausted { attempts } => {
                write!(f, "transaction not confirmed after {} polls", attempts)
            }
        }
    }
}

/// Errors that can occur during client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Account state is absent on-chain.
    #[error("Account error: {0}")]
    Account(String),

    /// Admission, execution or mempool rejected the submission.
    #[error("Transaction rejected: {0}")]
    Transaction(SubmitOutcome),

    /// The transaction was not observed in time.
    #[error("Transaction timeout: {0}")]
    TransactionTimeout(TimeoutKind),

    /// A ledger response failed verification against the trusted validators.
    #[error("Proof verification failed: {0}")]
    ProofVerification(#[from] VerifyError),

    /// Invalid network selection, port or trust root.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A verified response did not have the shape its request implies.
    #[error("Protocol violation: expected {expected} response, got {actual}")]
    ProtocolViolation {
        expected: &'static str,
        actual: String,
    },

    /// On-chain data could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The signer collaborator failed.
    #[error("Signer error: {0}")]
    Signer(String),

    /// RPC connection or request failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Out-of-band I/O failure (faucet).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Stable name of the error kind, for presentation.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Account(_) => "AccountError",
            ClientError::Transaction(_) => "TransactionError",
            ClientError::TransactionTimeout(_) => "TransactionTimeoutError",
            ClientError::ProofVerification(_) => "ProofVerificationError",
            ClientError::Config(_) => "LibraNetError",
            ClientError::ProtocolViolation { .. } => "ProtocolViolation",
            ClientError::Decode(_) => "DecodeError",
            ClientError::Signer(_) => "SignerError",
            ClientError::Transport(_) => "TransportError",
            ClientError::Io(_) => "IOError",
        }
    }
}

impl From<bincode::Error> for ClientError {
    fn from(e: bincode::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Per-transfer knobs; defaults mirror `TransactionConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOptions {
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    /// Seconds from now until the transaction expires.
    pub expiration_secs: u64,
    /// Wait for the transaction to be observed on-chain.
    pub blocking: bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        TransferOptions::from(&TransactionConfig::default())
    }
}

impl From<&TransactionConfig> for TransferOptions {
    fn from(config: &TransactionConfig) -> Self {
        Self {
            max_gas_amount: config.max_gas_amount,
            gas_unit_price: config.gas_unit_price,
            expiration_secs: config.expiration_secs,
            blocking: false,
        }
    }
}

/// Identifiers an operator needs to look a submitted transaction up later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmittedTransaction {
    pub sender: Address,
    pub sequence_number: u64,
    pub expiration_time: u64,
    /// Whether events were observed; `None` for non-blocking submissions.
    pub confirmed_with_events: Option<bool>,
}
