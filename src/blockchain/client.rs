//! Ledger client and verified ledger queries.
//!
//! # Responsibilities
//! - Hold the transport, verifier and trusted validator set for one endpoint
//! - Wrap each query in a single-item `UpdateToLatestLedger` batch
//! - Verify every response before any field of it is read
//! - Unwrap the response variant matching the request

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::blockchain::clock::{Clock, SystemClock};
use crate::blockchain::faucet::FaucetClient;
use crate::blockchain::types::{ClientError, ClientResult};
use crate::config::{
    load_validator_set, resolve_endpoint, validation::validate_config, ClientConfig, ConfigError,
    PollingConfig, TransactionConfig,
};
use crate::ledger::{
    AccessPath, AccountStateWithProof, Address, EventWithProof, LedgerInfo, RequestItem,
    ResponseItem, SignedTransaction, SignedTransactionWithProof, TransactionListWithProof,
    UpdateToLatestLedgerRequest, UpdateToLatestLedgerResponse, ValidatorVerifier,
};
use crate::observability::metrics;
use crate::transport::{AdmissionControl, HttpTransport};
use crate::verification::{LedgerVerifier, QuorumVerifier};

const UPDATE_TO_LATEST_LEDGER: &str = "update_to_latest_ledger";

/// Client for one admission-control endpoint.
pub struct LibraClient<T, V = QuorumVerifier> {
    pub(crate) transport: T,
    verifier: V,
    /// Trusted validators; fixed for the client's lifetime.
    validators: Arc<ValidatorVerifier>,
    pub(crate) transaction_defaults: TransactionConfig,
    pub(crate) polling: PollingConfig,
    pub(crate) faucet: Option<FaucetClient>,
    pub(crate) clock: Arc<dyn Clock>,
    /// Highest ledger version verified so far. Older responses are stale.
    known_version: AtomicU64,
}

impl LibraClient<HttpTransport, QuorumVerifier> {
    /// Build a client from configuration.
    ///
    /// Network selection, port and trust-root problems surface here, never
    /// during later operations.
    pub fn connect(config: &ClientConfig) -> ClientResult<Self> {
        validate_config(config).map_err(ConfigError::Validation)?;
        let endpoint = resolve_endpoint(&config.network)?;
        let validator_set_path = config
            .network
            .validator_set_path
            .as_deref()
            .ok_or(ConfigError::MissingTrustRoot)?;
        let validators = load_validator_set(validator_set_path)?;

        let timeout = Duration::from_secs(config.network.rpc_timeout_secs);
        let transport = HttpTransport::new(&endpoint, timeout)?;

        let mut client = Self::new(transport, QuorumVerifier, validators)
            .with_polling(config.polling.clone())
            .with_transaction_defaults(config.transaction.clone());
        if let Some(faucet_host) = &endpoint.faucet_host {
            client = client.with_faucet(FaucetClient::new(faucet_host, timeout)?);
        }

        tracing::info!(
            host = %endpoint.host,
            port = endpoint.port,
            faucet = endpoint.faucet_host.is_some(),
            "Client initialized"
        );
        Ok(client)
    }
}

impl<T: AdmissionControl, V: LedgerVerifier> LibraClient<T, V> {
    /// Create a client with default settings and the system clock.
    pub fn new(transport: T, verifier: V, validators: ValidatorVerifier) -> Self {
        Self {
            transport,
            verifier,
            validators: Arc::new(validators),
            transaction_defaults: TransactionConfig::default(),
            polling: PollingConfig::default(),
            faucet: None,
            clock: Arc::new(SystemClock),
            known_version: AtomicU64::new(0),
        }
    }

    pub fn with_polling(mut self, polling: PollingConfig) -> Self {
        self.polling = polling;
        self
    }

    pub fn with_transaction_defaults(mut self, defaults: TransactionConfig) -> Self {
        self.transaction_defaults = defaults;
        self
    }

    pub fn with_faucet(mut self, faucet: FaucetClient) -> Self {
        self.faucet = Some(faucet);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn validators(&self) -> &ValidatorVerifier {
        &self.validators
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn polling(&self) -> &PollingConfig {
        &self.polling
    }

    /// Highest ledger version any response has been verified at.
    pub fn known_version(&self) -> u64 {
        self.known_version.load(Ordering::Relaxed)
    }

    /// Send a query batch and verify the response against the trusted validators.
    pub async fn update_to_latest_ledger(
        &self,
        request: &UpdateToLatestLedgerRequest,
    ) -> ClientResult<UpdateToLatestLedgerResponse> {
        let request_id = Uuid::new_v4();
        tracing::debug!(
            %request_id,
            items = request.requested_items.len(),
            "Sending ledger query"
        );

        let response = match self.transport.update_to_latest_ledger(request).await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_rpc(UPDATE_TO_LATEST_LEDGER, "transport_error");
                return Err(e);
            }
        };

        if let Err(e) = self.verifier.verify(&self.validators, request, &response) {
            tracing::warn!(%request_id, error = %e, "Ledger response failed verification");
            metrics::record_rpc(UPDATE_TO_LATEST_LEDGER, "verification_failed");
            return Err(ClientError::ProofVerification(e));
        }

        self.known_version
            .fetch_max(response.ledger_info_with_sigs.version, Ordering::Relaxed);
        metrics::record_rpc(UPDATE_TO_LATEST_LEDGER, "ok");
        tracing::debug!(
            %request_id,
            version = response.ledger_info_with_sigs.version,
            "Ledger response verified"
        );
        Ok(response)
    }

    /// Run one query item and return its verified response and ledger info.
    pub async fn query(&self, item: RequestItem) -> ClientResult<(ResponseItem, LedgerInfo)> {
        let expected = item.kind();
        let request =
            UpdateToLatestLedgerRequest::single(item).at_known_version(self.known_version());
        let UpdateToLatestLedgerResponse {
            response_items,
            ledger_info_with_sigs,
        } = self.update_to_latest_ledger(&request).await?;

        let item = response_items
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::ProtocolViolation {
                expected,
                actual: "empty response batch".to_string(),
            })?;
        Ok((item, ledger_info_with_sigs))
    }

    pub async fn get_account_state_with_proof(
        &self,
        address: Address,
    ) -> ClientResult<(AccountStateWithProof, LedgerInfo)> {
        let request = RequestItem::GetAccountState { address };
        let expected = request.kind();
        match self.query(request).await? {
            (
                ResponseItem::GetAccountState {
                    account_state_with_proof,
                },
                info,
            ) => Ok((account_state_with_proof, info)),
            (other, _) => Err(unexpected(expected, &other)),
        }
    }

    pub async fn get_transactions_with_proof(
        &self,
        start_version: u64,
        limit: u64,
        fetch_events: bool,
    ) -> ClientResult<(TransactionListWithProof, LedgerInfo)> {
        let request = RequestItem::GetTransactions {
            start_version,
            limit,
            fetch_events,
        };
        let expected = request.kind();
        match self.query(request).await? {
            (ResponseItem::GetTransactions { txn_list_with_proof }, info) => {
                Ok((txn_list_with_proof, info))
            }
            (other, _) => Err(unexpected(expected, &other)),
        }
    }

    /// Look a transaction up by sender and sequence number.
    ///
    /// `None` means the ledger has not stored it (yet).
    pub async fn get_account_transaction_with_proof(
        &self,
        account: Address,
        sequence_number: u64,
        fetch_events: bool,
    ) -> ClientResult<(Option<SignedTransactionWithProof>, LedgerInfo)> {
        let request = RequestItem::GetAccountTransactionBySequenceNumber {
            account,
            sequence_number,
            fetch_events,
        };
        let expected = request.kind();
        match self.query(request).await? {
            (
                ResponseItem::GetAccountTransactionBySequenceNumber {
                    signed_transaction_with_proof,
                    ..
                },
                info,
            ) => Ok((signed_transaction_with_proof, info)),
            (other, _) => Err(unexpected(expected, &other)),
        }
    }

    pub async fn get_events_with_proof(
        &self,
        access_path: AccessPath,
        start_event_seq_num: u64,
        ascending: bool,
        limit: u64,
    ) -> ClientResult<(Vec<EventWithProof>, LedgerInfo)> {
        let request = RequestItem::GetEventsByAccessPath {
            access_path,
            start_event_seq_num,
            ascending,
            limit,
        };
        let expected = request.kind();
        match self.query(request).await? {
            (
                ResponseItem::GetEventsByAccessPath {
                    events_with_proof, ..
                },
                info,
            ) => Ok((events_with_proof, info)),
            (other, _) => Err(unexpected(expected, &other)),
        }
    }

    /// Latest verified ledger info (empty query batch).
    pub async fn get_latest_ledger_info(&self) -> ClientResult<LedgerInfo> {
        let request =
            UpdateToLatestLedgerRequest::default().at_known_version(self.known_version());
        let response = self.update_to_latest_ledger(&request).await?;
        Ok(response.ledger_info_with_sigs)
    }

    pub async fn get_latest_transaction_version(&self) -> ClientResult<u64> {
        Ok(self.get_latest_ledger_info().await?.version)
    }

    /// Up to `limit` committed transactions starting at `start_version`.
    pub async fn get_transactions(
        &self,
        start_version: u64,
        limit: u64,
    ) -> ClientResult<Vec<SignedTransaction>> {
        let (list, _) = self
            .get_transactions_with_proof(start_version, limit, false)
            .await?;
        Ok(list.transactions)
    }

    /// The transaction committed at `version`, if any.
    pub async fn get_transaction(&self, version: u64) -> ClientResult<Option<SignedTransaction>> {
        Ok(self.get_transactions(version, 1).await?.into_iter().next())
    }
}

fn unexpected(expected: &'static str, actual: &ResponseItem) -> ClientError {
    ClientError::ProtocolViolation {
        expected,
        actual: actual.kind().to_string(),
    }
}

impl<T, V> std::fmt::Debug for LibraClient<T, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraClient")
            .field("validators", &self.validators.len())
            .field("poll_interval_ms", &self.polling.interval_ms)
            .field("poll_max_attempts", &self.polling.max_attempts)
            .field("faucet", &self.faucet.is_some())
            .finish()
    }
}
