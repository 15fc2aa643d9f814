//! Ledger response verification.
//!
//! # Data Flow
//! ```text
//! UpdateToLatestLedger round trip
//!     → LedgerVerifier::verify(validators, request, response)
//!     → Ok: response fields may be read
//!     → Err(VerifyError): response discarded, caller sees ProofVerification
//! ```
//!
//! # Design Decisions
//! - Verification runs before any response field is read
//! - Failures are fatal for the call and never retried automatically
//! - `QuorumVerifier` is the default; tests and embedders may supply their own

pub mod quorum;

use thiserror::Error;

use crate::ledger::{UpdateToLatestLedgerRequest, UpdateToLatestLedgerResponse, ValidatorVerifier};

pub use quorum::QuorumVerifier;

/// Reasons a ledger response is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("expected {expected} response items, got {actual}")]
    ItemCountMismatch { expected: usize, actual: usize },

    #[error("response item {index} is {actual}, request asked for {expected}")]
    ShapeMismatch {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("ledger info signed by unknown validator {0}")]
    UnknownValidator(String),

    #[error("invalid public key for validator {0}")]
    MalformedKey(String),

    #[error("invalid signature from validator {0}")]
    BadSignature(String),

    #[error("ledger info has {have} valid signatures, quorum is {need}")]
    InsufficientSignatures { have: usize, need: usize },

    #[error("ledger version {actual} is older than known version {known}")]
    StaleLedger { known: u64, actual: u64 },

    #[error("response item {index}: {reason}")]
    InconsistentItem { index: usize, reason: String },
}

/// Checks an `UpdateToLatestLedger` response against the trusted validators.
pub trait LedgerVerifier: Send + Sync {
    fn verify(
        &self,
        validators: &ValidatorVerifier,
        request: &UpdateToLatestLedgerRequest,
        response: &UpdateToLatestLedgerResponse,
    ) -> Result<(), VerifyError>;
}
