//! Ledger client subsystem.
//!
//! # Data Flow
//! ```text
//! caller (CLI / embedding code)
//!     → transaction.rs (build from fresh sequence number, sign, submit, classify)
//!     → poller.rs (blocking mode: poll until stored / expired / budget spent)
//!     → client.rs (single-item query batch → transport → verification)
//!     → account.rs, events.rs (typed views over verified responses)
//!     → faucet.rs (test networks: out-of-band minting)
//! ```
//!
//! # Constraints
//! - Every ledger value passes verification before it reaches a caller
//! - No cached chain state; each operation re-reads the latest ledger
//! - Only the highest verified ledger version is kept, to reject stale responses
//! - Concurrent submitters for one account must be serialized by the caller

pub mod account;
pub mod client;
pub mod clock;
pub mod events;
pub mod faucet;
pub mod poller;
pub mod transaction;
pub mod types;

pub use client::LibraClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use faucet::FaucetClient;
pub use poller::PollState;
pub use types::{
    ClientError, ClientResult, SubmittedTransaction, TimeoutKind, TransferOptions,
};
