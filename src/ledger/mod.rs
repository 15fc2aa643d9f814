//! On-chain data model shared by the client, transport and verifier.
//!
//! # Data Flow
//! ```text
//! caller intent (addresses, amounts)
//!     → transaction.rs (RawTransaction, SignedTransaction)
//!     → submit.rs (admission-control envelope, SubmitOutcome)
//!
//! ledger queries
//!     → query.rs (request/response items, batch envelopes)
//!     → ledger_info.rs (signed ledger snapshot, trusted validator set)
//!     → account.rs (account state blob → AccountResource)
//! ```
//!
//! # Design Decisions
//! - All records derive serde traits; the canonical binary form is `bincode`
//! - Account state keeps insertion order (canonical encoding depends on it)
//! - Response families are closed enums, matched exhaustively

pub mod account;
pub mod address;
pub mod ledger_info;
pub mod query;
pub mod submit;
pub mod transaction;

pub use account::{
    account_received_event_path, account_resource_path, account_sent_event_path,
    AccountResource, AccountState, AccountStateBlob, EventHandle,
};
pub use address::{association_address, AccessPath, Address, AddressParseError, ADDRESS_LENGTH};
pub use ledger_info::{LedgerInfo, ValidatorSignature, ValidatorVerifier};
pub use query::{
    AccountStateWithProof, Event, EventWithProof, Proof, RequestItem, ResponseItem,
    SignedTransactionWithProof, TransactionListWithProof, UpdateToLatestLedgerRequest,
    UpdateToLatestLedgerResponse,
};
pub use submit::{
    AdmissionControlStatus, AdmissionControlStatusCode, MempoolStatus, MempoolStatusCode,
    SubmissionStatus, SubmitOutcome, SubmitTransactionRequest, SubmitTransactionResponse,
    VmStatus,
};
pub use transaction::{RawTransaction, SignedTransaction, TransactionPayload, TransactionSigner};
