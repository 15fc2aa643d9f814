//! Event queries by access path.
//!
//! Results are an eager, bounded batch of at most `limit` events. Ascending
//! queries return sequence numbers `>= start` in increasing order; descending
//! queries return sequence numbers `<= start` in decreasing order.

use crate::blockchain::client::LibraClient;
use crate::blockchain::types::ClientResult;
use crate::ledger::{
    account_received_event_path, account_sent_event_path, AccessPath, Address, EventWithProof,
};
use crate::transport::AdmissionControl;
use crate::verification::LedgerVerifier;

impl<T: AdmissionControl, V: LedgerVerifier> LibraClient<T, V> {
    pub async fn get_events(
        &self,
        address: Address,
        path: Vec<u8>,
        start_sequence_number: u64,
        ascending: bool,
        limit: u64,
    ) -> ClientResult<Vec<EventWithProof>> {
        let access_path = AccessPath::new(address, path);
        let (events, info) = self
            .get_events_with_proof(access_path, start_sequence_number, ascending, limit)
            .await?;
        tracing::debug!(
            %address,
            start_sequence_number,
            ascending,
            limit,
            returned = events.len(),
            version = info.version,
            "Events fetched"
        );
        Ok(events)
    }

    pub async fn get_events_sent(
        &self,
        address: Address,
        start_sequence_number: u64,
        ascending: bool,
        limit: u64,
    ) -> ClientResult<Vec<EventWithProof>> {
        self.get_events(address, account_sent_event_path(), start_sequence_number, ascending, limit)
            .await
    }

    pub async fn get_events_received(
        &self,
        address: Address,
        start_sequence_number: u64,
        ascending: bool,
        limit: u64,
    ) -> ClientResult<Vec<EventWithProof>> {
        self.get_events(
            address,
            account_received_event_path(),
            start_sequence_number,
            ascending,
            limit,
        )
        .await
    }

    /// The `limit` most recent sent-payment events, newest first.
    pub async fn get_latest_events_sent(
        &self,
        address: Address,
        limit: u64,
    ) -> ClientResult<Vec<EventWithProof>> {
        self.get_events_sent(address, u64::MAX, false, limit).await
    }

    /// The `limit` most recent received-payment events, newest first.
    pub async fn get_latest_events_received(
        &self,
        address: Address,
        limit: u64,
    ) -> ClientResult<Vec<EventWithProof>> {
        self.get_events_received(address, u64::MAX, false, limit).await
    }
}
