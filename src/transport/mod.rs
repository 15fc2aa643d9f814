//! Admission-control transport.
//!
//! # Data Flow
//! ```text
//! LibraClient
//!     → AdmissionControl::submit_transaction      (signed txn bytes → status)
//!     → AdmissionControl::update_to_latest_ledger (query batch → items + ledger info)
//!     → http.rs (JSON over HTTP to one endpoint)
//! ```
//!
//! # Design Decisions
//! - The trait is the seam: tests drive the client with an in-memory ledger
//! - Transport does no verification; the client verifies every ledger response

pub mod http;

use std::future::Future;

use crate::blockchain::types::ClientResult;
use crate::ledger::{
    SubmitTransactionRequest, SubmitTransactionResponse, UpdateToLatestLedgerRequest,
    UpdateToLatestLedgerResponse,
};

pub use http::HttpTransport;

/// The two RPCs exposed by an admission-control endpoint.
pub trait AdmissionControl: Send + Sync {
    fn submit_transaction(
        &self,
        request: &SubmitTransactionRequest,
    ) -> impl Future<Output = ClientResult<SubmitTransactionResponse>> + Send;

    fn update_to_latest_ledger(
        &self,
        request: &UpdateToLatestLedgerRequest,
    ) -> impl Future<Output = ClientResult<UpdateToLatestLedgerResponse>> + Send;
}
