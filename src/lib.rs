//! Client for a permissioned ledger fronted by an admission-control service.
//!
//! Submits signed transactions and answers verified ledger queries (account
//! state, transactions, events) over a single multiplexed request/response RPC.

pub mod blockchain;
pub mod config;
pub mod ledger;
pub mod observability;
pub mod transport;
pub mod verification;

pub use blockchain::{ClientError, ClientResult, LibraClient, TransferOptions};
pub use config::ClientConfig;
pub use ledger::Address;
