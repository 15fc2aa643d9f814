//! Multiplexed ledger-query request and response items.

use serde::{Deserialize, Serialize};

use crate::ledger::account::AccountStateBlob;
use crate::ledger::address::{AccessPath, Address};
use crate::ledger::ledger_info::LedgerInfo;
use crate::ledger::transaction::SignedTransaction;

/// Opaque proof bytes; carried but never interpreted by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof(pub Vec<u8>);

/// One query inside an `UpdateToLatestLedger` batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestItem {
    GetAccountState {
        address: Address,
    },
    GetTransactions {
        start_version: u64,
        limit: u64,
        fetch_events: bool,
    },
    GetAccountTransactionBySequenceNumber {
        account: Address,
        sequence_number: u64,
        fetch_events: bool,
    },
    GetEventsByAccessPath {
        access_path: AccessPath,
        start_event_seq_num: u64,
        ascending: bool,
        limit: u64,
    },
}

impl RequestItem {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GetAccountState { .. } => "get_account_state",
            Self::GetTransactions { .. } => "get_transactions",
            Self::GetAccountTransactionBySequenceNumber { .. } => {
                "get_account_transaction_by_sequence_number"
            }
            Self::GetEventsByAccessPath { .. } => "get_events_by_access_path",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStateWithProof {
    pub version: u64,
    /// `None` when the account does not exist.
    pub blob: Option<AccountStateBlob>,
    pub proof: Proof,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub access_path: AccessPath,
    pub sequence_number: u64,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWithProof {
    pub transaction_version: u64,
    pub event_index: u64,
    pub event: Event,
    pub proof: Proof,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransactionWithProof {
    pub version: u64,
    pub signed_transaction: SignedTransaction,
    pub proof: Proof,
    /// Present only when events were requested.
    pub events: Option<Vec<Event>>,
}

impl SignedTransactionWithProof {
    pub fn event_count(&self) -> usize {
        self.events.as_ref().map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionListWithProof {
    pub first_transaction_version: Option<u64>,
    pub transactions: Vec<SignedTransaction>,
    /// One event list per transaction, when events were requested.
    pub events_for_versions: Option<Vec<Vec<Event>>>,
    pub proof: Proof,
}

/// Response to one `RequestItem`; the variant always mirrors the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseItem {
    GetAccountState {
        account_state_with_proof: AccountStateWithProof,
    },
    GetTransactions {
        txn_list_with_proof: TransactionListWithProof,
    },
    GetAccountTransactionBySequenceNumber {
        signed_transaction_with_proof: Option<SignedTransactionWithProof>,
        proof_of_current_sequence_number: Option<AccountStateWithProof>,
    },
    GetEventsByAccessPath {
        events_with_proof: Vec<EventWithProof>,
        proof_of_latest_event: Option<AccountStateWithProof>,
    },
}

impl ResponseItem {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GetAccountState { .. } => "get_account_state",
            Self::GetTransactions { .. } => "get_transactions",
            Self::GetAccountTransactionBySequenceNumber { .. } => {
                "get_account_transaction_by_sequence_number"
            }
            Self::GetEventsByAccessPath { .. } => "get_events_by_access_path",
        }
    }

    /// Whether this response has the shape `request` asks for.
    pub fn answers(&self, request: &RequestItem) -> bool {
        self.kind() == request.kind()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateToLatestLedgerRequest {
    pub client_known_version: u64,
    pub requested_items: Vec<RequestItem>,
}

impl UpdateToLatestLedgerRequest {
    /// Batch carrying exactly one item.
    pub fn single(item: RequestItem) -> Self {
        Self {
            client_known_version: 0,
            requested_items: vec![item],
        }
    }

    /// Ask the server to prove consistency from `version` onward.
    pub fn at_known_version(mut self, version: u64) -> Self {
        self.client_known_version = version;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateToLatestLedgerResponse {
    pub response_items: Vec<ResponseItem>,
    pub ledger_info_with_sigs: LedgerInfo,
}
