//! JSON-over-HTTP admission-control transport.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::blockchain::types::{ClientError, ClientResult};
use crate::config::NetworkEndpoint;
use crate::ledger::{
    SubmitTransactionRequest, SubmitTransactionResponse, UpdateToLatestLedgerRequest,
    UpdateToLatestLedgerResponse,
};
use crate::transport::AdmissionControl;

const SUBMIT_TRANSACTION_PATH: &str = "submit_transaction";
const UPDATE_TO_LATEST_LEDGER_PATH: &str = "update_to_latest_ledger";

/// Transport talking to a single admission-control endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport for `endpoint` with a per-request timeout.
    pub fn new(endpoint: &NetworkEndpoint, timeout: Duration) -> ClientResult<Self> {
        let base = endpoint.base_url();
        let base_url: Url = format!("{}/", base)
            .parse()
            .map_err(|e| ClientError::Transport(format!("Invalid endpoint '{}': {}", base, e)))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        tracing::info!(endpoint = %base_url, timeout_secs = timeout.as_secs(), "Admission-control transport ready");
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> ClientResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned + Send,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::Transport(format!("Invalid path '{}': {}", path, e)))?;

        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("{} request failed: {}", path, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ClientError::Transport(format!(
                "{} returned status {}: {}",
                path, status, text
            )));
        }

        resp.json::<Resp>()
            .await
            .map_err(|e| ClientError::Transport(format!("{} response malformed: {}", path, e)))
    }
}

impl AdmissionControl for HttpTransport {
    async fn submit_transaction(
        &self,
        request: &SubmitTransactionRequest,
    ) -> ClientResult<SubmitTransactionResponse> {
        self.post_json(SUBMIT_TRANSACTION_PATH, request).await
    }

    async fn update_to_latest_ledger(
        &self,
        request: &UpdateToLatestLedgerRequest,
    ) -> ClientResult<UpdateToLatestLedgerResponse> {
        self.post_json(UPDATE_TO_LATEST_LEDGER_PATH, request).await
    }
}
