//! Faucet side-channel for test networks.
//!
//! `POST http://<faucet_host>?amount=<n>&address=<addr>` answers with the
//! association account's next sequence number as plain text.

use reqwest::{Client, StatusCode};
use std::io;
use std::time::Duration;

use crate::blockchain::client::LibraClient;
use crate::blockchain::types::{ClientError, ClientResult};
use crate::config::ConfigError;
use crate::ledger::{association_address, Address};
use crate::transport::AdmissionControl;
use crate::verification::LedgerVerifier;

/// HTTP client for a faucet service.
#[derive(Debug, Clone)]
pub struct FaucetClient {
    http: Client,
    host: String,
}

impl FaucetClient {
    pub fn new(host: &str, timeout: Duration) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            host: host.to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Request `amount` micro-coins for `receiver`.
    ///
    /// Returns the sequence number reported by the faucet.
    pub async fn mint(&self, receiver: Address, amount: u64) -> ClientResult<u64> {
        let url = format!(
            "http://{}?amount={}&address={}",
            self.host, amount, receiver
        );
        let resp = self.http.post(&url).send().await.map_err(|e| {
            io::Error::other(format!(
                "Failed to send request to faucet service {}: {}",
                self.host, e
            ))
        })?;

        if resp.status() != StatusCode::OK {
            return Err(io::Error::other(format!(
                "Failed to send request to faucet service: {} (status {})",
                self.host,
                resp.status()
            ))
            .into());
        }

        let body = resp.text().await.map_err(|e| {
            io::Error::other(format!("Failed to read faucet response: {}", e))
        })?;
        body.trim().parse::<u64>().map_err(|e| {
            ClientError::Decode(format!("faucet returned '{}': {}", body.trim(), e))
        })
    }
}

impl<T: AdmissionControl, V: LedgerVerifier> LibraClient<T, V> {
    /// Mint coins through the faucet. When `blocking`, wait for the
    /// association account's minting transaction to be stored.
    pub async fn mint_coins_with_faucet_service(
        &self,
        receiver: Address,
        amount: u64,
        blocking: bool,
    ) -> ClientResult<u64> {
        let faucet = self
            .faucet
            .as_ref()
            .ok_or(ClientError::Config(ConfigError::MissingFaucet))?;

        let sequence_number = faucet.mint(receiver, amount).await?;
        tracing::info!(
            faucet = faucet.host(),
            %receiver,
            amount,
            sequence_number,
            "Faucet accepted mint request"
        );

        if blocking {
            let minted = sequence_number.checked_sub(1).ok_or_else(|| {
                ClientError::Decode("faucet returned sequence number 0".to_string())
            })?;
            self.wait_for_transaction(association_address(), minted, u64::MAX)
                .await?;
        }
        Ok(sequence_number)
    }
}
