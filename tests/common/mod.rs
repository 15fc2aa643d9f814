//! Shared utilities for integration tests: an in-memory ledger behind the
//! admission-control trait, and a raw-TCP HTTP stub.

#![allow(dead_code)]

use ed25519_dalek::{Signer, SigningKey};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use libra_client::blockchain::{ClientResult, FixedClock, LibraClient};
use libra_client::config::PollingConfig;
use libra_client::ledger::{
    account_sent_event_path, AccessPath, AccountResource, AccountStateWithProof, Address,
    AdmissionControlStatus, AdmissionControlStatusCode, Event, EventWithProof, LedgerInfo,
    MempoolStatus, MempoolStatusCode, Proof, RawTransaction, RequestItem, ResponseItem,
    SignedTransaction, SignedTransactionWithProof, SubmissionStatus, SubmitTransactionRequest,
    SubmitTransactionResponse, TransactionListWithProof, TransactionSigner,
    UpdateToLatestLedgerRequest, UpdateToLatestLedgerResponse, ValidatorSignature,
    ValidatorVerifier,
};
use libra_client::transport::AdmissionControl;
use libra_client::verification::{LedgerVerifier, QuorumVerifier, VerifyError};

/// Wall-clock "now" used by test clients.
pub const NOW_SECS: u64 = 1_700_000_000;

pub fn addr(byte: u8) -> Address {
    Address::new([byte; 32])
}

pub fn validator_keys() -> Vec<SigningKey> {
    (1..=4u8).map(|i| SigningKey::from_bytes(&[i; 32])).collect()
}

pub fn validator_set() -> ValidatorVerifier {
    ValidatorVerifier::new(
        validator_keys()
            .iter()
            .enumerate()
            .map(|(i, k)| (format!("validator-{}", i), k.verifying_key().to_bytes())),
    )
}

struct Pending {
    signed: SignedTransaction,
    polls_left: u32,
}

/// Mutable state of the in-memory ledger.
pub struct LedgerState {
    pub accounts: HashMap<Address, AccountResource>,
    /// Raw account state blobs overriding `accounts` (for malformed-state tests).
    pub raw_states: HashMap<Address, Vec<u8>>,
    pub committed: Vec<SignedTransactionWithProof>,
    pub events: Vec<EventWithProof>,
    pending: Vec<Pending>,
    pub version: u64,
    pub timestamp_usecs: u64,
    /// Polls of a pending transaction before it is stored.
    pub confirm_after_polls: u32,
    /// Transactions that are accepted but never stored.
    pub never_commit: bool,
    pub events_per_txn: usize,
    /// Replaces the next submission's response.
    pub next_submit_response: Option<SubmitTransactionResponse>,
    /// Number of validators signing ledger infos.
    pub signers: usize,
    pub submissions: Vec<SignedTransaction>,
    pub txn_queries: Vec<(Address, u64)>,
}

/// In-memory ledger implementing the admission-control RPCs.
#[derive(Clone)]
pub struct StubLedger {
    state: Arc<Mutex<LedgerState>>,
    keys: Arc<Vec<SigningKey>>,
}

impl StubLedger {
    pub fn new() -> Self {
        let keys = validator_keys();
        let signers = keys.len();
        Self {
            state: Arc::new(Mutex::new(LedgerState {
                accounts: HashMap::new(),
                raw_states: HashMap::new(),
                committed: Vec::new(),
                events: Vec::new(),
                pending: Vec::new(),
                version: 100,
                timestamp_usecs: NOW_SECS * 1_000_000,
                confirm_after_polls: 1,
                never_commit: false,
                events_per_txn: 1,
                next_submit_response: None,
                signers,
                submissions: Vec::new(),
                txn_queries: Vec::new(),
            })),
            keys: Arc::new(keys),
        }
    }

    pub fn with_account(self, address: Address, sequence_number: u64, balance: u64) -> Self {
        self.state().accounts.insert(
            address,
            AccountResource {
                balance,
                sequence_number,
                ..Default::default()
            },
        );
        self
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap()
    }

    /// Store a transaction directly, as if another client had submitted it.
    pub fn commit_external(&self, signed: SignedTransaction) {
        let mut state = self.state();
        Self::commit(&mut state, signed);
    }

    /// Append an event to `access_path` with the given sequence number.
    pub fn push_event(&self, access_path: AccessPath, sequence_number: u64) {
        let mut state = self.state();
        state.version += 1;
        let version = state.version;
        state.events.push(EventWithProof {
            transaction_version: version,
            event_index: 0,
            event: Event {
                access_path,
                sequence_number,
                data: sequence_number.to_le_bytes().to_vec(),
            },
            proof: Proof::default(),
        });
    }

    fn commit(state: &mut LedgerState, signed: SignedTransaction) {
        state.version += 1;
        let version = state.version;
        let sender = signed.sender();

        let mut events = Vec::new();
        let account = state.accounts.entry(sender).or_default();
        account.sequence_number = signed.sequence_number() + 1;
        for index in 0..state.events_per_txn {
            let event = Event {
                access_path: AccessPath::new(sender, account_sent_event_path()),
                sequence_number: account.sent_events.count,
                data: Vec::new(),
            };
            account.sent_events.count += 1;
            events.push(EventWithProof {
                transaction_version: version,
                event_index: index as u64,
                event: event.clone(),
                proof: Proof::default(),
            });
        }
        let plain: Vec<Event> = events.iter().map(|e| e.event.clone()).collect();
        state.events.extend(events);
        state.committed.push(SignedTransactionWithProof {
            version,
            signed_transaction: signed,
            proof: Proof::default(),
            events: Some(plain),
        });
    }

    fn ledger_info(&self, state: &LedgerState) -> LedgerInfo {
        let mut info = LedgerInfo {
            version: state.version,
            timestamp_usecs: state.timestamp_usecs,
            signatures: Vec::new(),
        };
        let message = info.signing_message();
        info.signatures = self
            .keys
            .iter()
            .enumerate()
            .take(state.signers)
            .map(|(i, k)| ValidatorSignature {
                validator: format!("validator-{}", i),
                signature: k.sign(&message).to_bytes().to_vec(),
            })
            .collect();
        info
    }

    fn status(status: SubmissionStatus) -> SubmitTransactionResponse {
        SubmitTransactionResponse {
            status: Some(status),
            validator_id: Some("validator-0".into()),
        }
    }

    pub fn handle_submit(&self, request: &SubmitTransactionRequest) -> SubmitTransactionResponse {
        let mut state = self.state();
        let signed = SignedTransaction::from_bytes(&request.signed_txn).unwrap();
        state.submissions.push(signed.clone());

        if let Some(response) = state.next_submit_response.take() {
            return response;
        }

        let expected = state
            .accounts
            .get(&signed.sender())
            .map(|a| a.sequence_number);
        let already_pending = state.pending.iter().any(|p| {
            p.signed.sender() == signed.sender()
                && p.signed.sequence_number() == signed.sequence_number()
        });
        if expected != Some(signed.sequence_number()) || already_pending {
            return Self::status(SubmissionStatus::Mempool(MempoolStatus {
                code: MempoolStatusCode::InvalidSeqNumber,
                message: format!("expected {:?}", expected),
            }));
        }

        if state.confirm_after_polls == 0 && !state.never_commit {
            Self::commit(&mut state, signed);
        } else {
            let polls_left = state.confirm_after_polls;
            state.pending.push(Pending { signed, polls_left });
        }
        Self::status(SubmissionStatus::AdmissionControl(AdmissionControlStatus {
            code: AdmissionControlStatusCode::Accepted,
            message: String::new(),
        }))
    }

    fn answer(state: &mut LedgerState, item: &RequestItem) -> ResponseItem {
        match item {
            RequestItem::GetAccountState { address } => {
                let blob = match state.raw_states.get(address) {
                    Some(raw) => Some(libra_client::ledger::AccountStateBlob(raw.clone())),
                    None => state
                        .accounts
                        .get(address)
                        .map(|a| a.to_state_blob().unwrap()),
                };
                ResponseItem::GetAccountState {
                    account_state_with_proof: AccountStateWithProof {
                        version: state.version,
                        blob,
                        proof: Proof::default(),
                    },
                }
            }
            RequestItem::GetTransactions {
                start_version,
                limit,
                fetch_events,
            } => {
                let txns: Vec<&SignedTransactionWithProof> = state
                    .committed
                    .iter()
                    .skip_while(|t| t.version < *start_version)
                    .take(*limit as usize)
                    .collect();
                let txns = match txns.first() {
                    Some(first) if first.version != *start_version => Vec::new(),
                    _ => txns,
                };
                ResponseItem::GetTransactions {
                    txn_list_with_proof: TransactionListWithProof {
                        first_transaction_version: txns.first().map(|t| t.version),
                        transactions: txns.iter().map(|t| t.signed_transaction.clone()).collect(),
                        events_for_versions: fetch_events.then(|| {
                            txns.iter()
                                .map(|t| t.events.clone().unwrap_or_default())
                                .collect()
                        }),
                        proof: Proof::default(),
                    },
                }
            }
            RequestItem::GetAccountTransactionBySequenceNumber {
                account,
                sequence_number,
                fetch_events,
            } => {
                state.txn_queries.push((*account, *sequence_number));

                let never_commit = state.never_commit;
                if let Some(pos) = state.pending.iter().position(|p| {
                    p.signed.sender() == *account && p.signed.sequence_number() == *sequence_number
                }) {
                    let pending = &mut state.pending[pos];
                    pending.polls_left = pending.polls_left.saturating_sub(1);
                    if pending.polls_left == 0 && !never_commit {
                        let pending = state.pending.remove(pos);
                        Self::commit(state, pending.signed);
                    }
                }

                let found = state
                    .committed
                    .iter()
                    .find(|t| {
                        t.signed_transaction.sender() == *account
                            && t.signed_transaction.sequence_number() == *sequence_number
                    })
                    .cloned()
                    .map(|mut t| {
                        if !fetch_events {
                            t.events = None;
                        }
                        t
                    });
                ResponseItem::GetAccountTransactionBySequenceNumber {
                    signed_transaction_with_proof: found,
                    proof_of_current_sequence_number: None,
                }
            }
            RequestItem::GetEventsByAccessPath {
                access_path,
                start_event_seq_num,
                ascending,
                limit,
            } => {
                let mut events: Vec<EventWithProof> = state
                    .events
                    .iter()
                    .filter(|e| e.event.access_path == *access_path)
                    .filter(|e| {
                        if *ascending {
                            e.event.sequence_number >= *start_event_seq_num
                        } else {
                            e.event.sequence_number <= *start_event_seq_num
                        }
                    })
                    .cloned()
                    .collect();
                events.sort_by_key(|e| e.event.sequence_number);
                if !*ascending {
                    events.reverse();
                }
                events.truncate(*limit as usize);
                ResponseItem::GetEventsByAccessPath {
                    events_with_proof: events,
                    proof_of_latest_event: None,
                }
            }
        }
    }

    pub fn handle_query(&self, request: &UpdateToLatestLedgerRequest) -> UpdateToLatestLedgerResponse {
        let mut state = self.state();
        let response_items = request
            .requested_items
            .iter()
            .map(|item| Self::answer(&mut state, item))
            .collect();
        UpdateToLatestLedgerResponse {
            response_items,
            ledger_info_with_sigs: self.ledger_info(&state),
        }
    }
}

impl AdmissionControl for StubLedger {
    async fn submit_transaction(
        &self,
        request: &SubmitTransactionRequest,
    ) -> ClientResult<SubmitTransactionResponse> {
        Ok(self.handle_submit(request))
    }

    async fn update_to_latest_ledger(
        &self,
        request: &UpdateToLatestLedgerRequest,
    ) -> ClientResult<UpdateToLatestLedgerResponse> {
        Ok(self.handle_query(request))
    }
}

/// Answers every query with a misshapen batch while still signing the
/// ledger info.
#[derive(Clone)]
pub struct MisansweringLedger {
    inner: StubLedger,
    drop_items: bool,
}

impl MisansweringLedger {
    /// Replaces each response item with an empty transaction list.
    pub fn wrong_variant(inner: StubLedger) -> Self {
        Self {
            inner,
            drop_items: false,
        }
    }

    /// Returns no response items at all.
    pub fn empty_batch(inner: StubLedger) -> Self {
        Self {
            inner,
            drop_items: true,
        }
    }
}

impl AdmissionControl for MisansweringLedger {
    async fn submit_transaction(
        &self,
        request: &SubmitTransactionRequest,
    ) -> ClientResult<SubmitTransactionResponse> {
        Ok(self.inner.handle_submit(request))
    }

    async fn update_to_latest_ledger(
        &self,
        request: &UpdateToLatestLedgerRequest,
    ) -> ClientResult<UpdateToLatestLedgerResponse> {
        let mut response = self.inner.handle_query(request);
        if self.drop_items {
            response.response_items.clear();
        } else {
            for item in response.response_items.iter_mut() {
                *item = ResponseItem::GetTransactions {
                    txn_list_with_proof: TransactionListWithProof::default(),
                };
            }
        }
        Ok(response)
    }
}

/// Verifier that accepts everything.
pub struct AcceptingVerifier;

impl LedgerVerifier for AcceptingVerifier {
    fn verify(
        &self,
        _validators: &ValidatorVerifier,
        _request: &UpdateToLatestLedgerRequest,
        _response: &UpdateToLatestLedgerResponse,
    ) -> Result<(), VerifyError> {
        Ok(())
    }
}

/// Client over a stub ledger with instant polling and a fixed clock.
pub fn stub_client(ledger: StubLedger) -> LibraClient<StubLedger> {
    LibraClient::new(ledger, QuorumVerifier, validator_set())
        .with_polling(PollingConfig {
            interval_ms: 0,
            max_attempts: 50,
        })
        .with_clock(Arc::new(FixedClock(NOW_SECS)))
}

/// Verifier that rejects everything.
pub struct RejectingVerifier;

impl LedgerVerifier for RejectingVerifier {
    fn verify(
        &self,
        _validators: &ValidatorVerifier,
        _request: &UpdateToLatestLedgerRequest,
        _response: &UpdateToLatestLedgerResponse,
    ) -> Result<(), VerifyError> {
        Err(VerifyError::InsufficientSignatures { have: 0, need: 3 })
    }
}

/// Signer that attaches placeholder key material.
pub struct TestSigner;

impl TransactionSigner for TestSigner {
    type Error = String;

    fn sign(&self, raw_txn: RawTransaction) -> Result<SignedTransaction, String> {
        Ok(SignedTransaction {
            raw_txn,
            public_key: vec![7; 32],
            signature: vec![9; 64],
        })
    }
}

/// Signer that always fails.
pub struct BrokenSigner;

impl TransactionSigner for BrokenSigner {
    type Error = String;

    fn sign(&self, _raw_txn: RawTransaction) -> Result<SignedTransaction, String> {
        Err("key unavailable".to_string())
    }
}

/// A request as seen by the HTTP stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub body: String,
}

/// Start an HTTP stub on an ephemeral port; `handler` maps each request to
/// `(status, body)`.
pub async fn start_http_stub<F>(handler: F) -> (SocketAddr, Arc<Mutex<Vec<RecordedRequest>>>)
where
    F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);
    let recorded = Arc::new(Mutex::new(Vec::new()));
    let log = recorded.clone();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let handler = handler.clone();
            let log = log.clone();
            tokio::spawn(async move {
                let Some(request) = read_request(&mut socket).await else {
                    return;
                };
                log.lock().unwrap().push(request.clone());
                let (status, body) = handler(&request);
                let status_text = match status {
                    200 => "200 OK",
                    404 => "404 Not Found",
                    500 => "500 Internal Server Error",
                    503 => "503 Service Unavailable",
                    _ => "400 Bad Request",
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_text,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, recorded)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let target = request_line.next().unwrap_or_default().to_string();
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();
    Some(RecordedRequest {
        method,
        target,
        body,
    })
}
