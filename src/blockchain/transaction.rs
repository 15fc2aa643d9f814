//! Transaction building, signing, and submission.
//!
//! # Responsibilities
//! - Build payment transactions from the sender's current sequence number
//! - Obtain a signature from the caller's signer
//! - Submit and classify the admission result
//! - Optionally wait for the transaction to land

use crate::blockchain::client::LibraClient;
use crate::blockchain::types::{
    ClientError, ClientResult, SubmittedTransaction, TransferOptions,
};
use crate::ledger::{
    Address, RawTransaction, SignedTransaction, SubmitOutcome, SubmitTransactionRequest,
    SubmitTransactionResponse, TransactionSigner,
};
use crate::observability::metrics;
use crate::transport::AdmissionControl;
use crate::verification::LedgerVerifier;

impl<T: AdmissionControl, V: LedgerVerifier> LibraClient<T, V> {
    /// Transfer options seeded from this client's transaction defaults.
    pub fn transfer_options(&self) -> TransferOptions {
        TransferOptions::from(&self.transaction_defaults)
    }

    /// Build a payment from `sender` to `receiver`.
    ///
    /// The sequence number is read from the latest ledger, never incremented
    /// locally.
    pub async fn build_transfer(
        &self,
        sender: Address,
        receiver: Address,
        amount: u64,
        options: &TransferOptions,
    ) -> ClientResult<RawTransaction> {
        let sequence_number = self.get_sequence_number(sender).await?;
        let expiration_time = self.clock.now_secs().saturating_add(options.expiration_secs);

        Ok(RawTransaction::transfer(
            sender,
            sequence_number,
            receiver,
            amount,
            options.max_gas_amount,
            options.gas_unit_price,
            expiration_time,
        ))
    }

    /// Build, sign and submit a payment.
    ///
    /// Returns the sender and sequence number so the transaction can be looked
    /// up later whether or not the call blocked.
    pub async fn transfer_coins<S: TransactionSigner>(
        &self,
        sender: Address,
        signer: &S,
        receiver: Address,
        amount: u64,
        options: TransferOptions,
    ) -> ClientResult<SubmittedTransaction> {
        let raw_txn = self.build_transfer(sender, receiver, amount, &options).await?;

        tracing::info!(
            %sender,
            %receiver,
            amount,
            sequence_number = raw_txn.sequence_number,
            expiration_time = raw_txn.expiration_time,
            "Submitting transfer"
        );

        let signed = signer
            .sign(raw_txn)
            .map_err(|e| ClientError::Signer(e.to_string()))?;
        self.submit_transaction(&signed, options.blocking).await
    }

    /// Submit a signed transaction, optionally waiting for confirmation.
    pub async fn submit_transaction(
        &self,
        signed: &SignedTransaction,
        blocking: bool,
    ) -> ClientResult<SubmittedTransaction> {
        self.submit_transaction_non_blocking(signed).await?;

        let raw = &signed.raw_txn;
        let confirmed_with_events = if blocking {
            Some(
                self.wait_for_transaction(raw.sender, raw.sequence_number, raw.expiration_time)
                    .await?,
            )
        } else {
            None
        };

        Ok(SubmittedTransaction {
            sender: raw.sender,
            sequence_number: raw.sequence_number,
            expiration_time: raw.expiration_time,
            confirmed_with_events,
        })
    }

    /// Submit without waiting. Anything but admission acceptance is an error.
    pub async fn submit_transaction_non_blocking(
        &self,
        signed: &SignedTransaction,
    ) -> ClientResult<SubmitTransactionResponse> {
        let request = SubmitTransactionRequest {
            signed_txn: signed.to_bytes()?,
        };
        let response = self.transport.submit_transaction(&request).await?;
        let outcome = SubmitOutcome::from(&response);
        metrics::record_submission(outcome.label());

        if outcome.is_accepted() {
            tracing::info!(
                sender = %signed.sender(),
                sequence_number = signed.sequence_number(),
                validator = response.validator_id.as_deref().unwrap_or("unknown"),
                "Transaction accepted by admission control"
            );
            Ok(response)
        } else {
            tracing::warn!(
                sender = %signed.sender(),
                sequence_number = signed.sequence_number(),
                outcome = %outcome,
                "Transaction rejected"
            );
            Err(ClientError::Transaction(outcome))
        }
    }
}
