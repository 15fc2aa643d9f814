//! Quorum-signature and response-consistency verification.
//!
//! # Responsibilities
//! - Check the ledger info carries signatures from a validator quorum
//! - Check each response item answers its request item
//! - Check item contents against the request bounds (events, transactions)
//!
//! Merkle proofs are carried opaquely and are not interpreted here.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use std::collections::HashSet;

use crate::ledger::{
    LedgerInfo, RequestItem, ResponseItem, UpdateToLatestLedgerRequest,
    UpdateToLatestLedgerResponse, ValidatorVerifier,
};
use crate::verification::{LedgerVerifier, VerifyError};

/// Default verifier: ed25519 quorum signatures plus structural checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuorumVerifier;

impl QuorumVerifier {
    fn verify_signatures(
        validators: &ValidatorVerifier,
        ledger_info: &LedgerInfo,
    ) -> Result<(), VerifyError> {
        let message = ledger_info.signing_message();
        let mut signers = HashSet::new();

        for sig in &ledger_info.signatures {
            let key_bytes = validators
                .public_key(&sig.validator)
                .ok_or_else(|| VerifyError::UnknownValidator(sig.validator.clone()))?;
            let key = VerifyingKey::from_bytes(key_bytes)
                .map_err(|_| VerifyError::MalformedKey(sig.validator.clone()))?;
            let signature = Signature::from_slice(&sig.signature)
                .map_err(|_| VerifyError::BadSignature(sig.validator.clone()))?;
            key.verify(&message, &signature)
                .map_err(|_| VerifyError::BadSignature(sig.validator.clone()))?;
            signers.insert(sig.validator.as_str());
        }

        if signers.len() < validators.quorum() {
            return Err(VerifyError::InsufficientSignatures {
                have: signers.len(),
                need: validators.quorum(),
            });
        }
        Ok(())
    }

    fn verify_item(
        index: usize,
        request: &RequestItem,
        response: &ResponseItem,
        ledger_version: u64,
    ) -> Result<(), VerifyError> {
        let inconsistent = |reason: String| VerifyError::InconsistentItem { index, reason };

        match (request, response) {
            (
                RequestItem::GetAccountState { .. },
                ResponseItem::GetAccountState {
                    account_state_with_proof,
                },
            ) => {
                if account_state_with_proof.version > ledger_version {
                    return Err(inconsistent(format!(
                        "account state version {} is ahead of ledger version {}",
                        account_state_with_proof.version, ledger_version
                    )));
                }
            }
            (
                RequestItem::GetTransactions {
                    start_version,
                    limit,
                    fetch_events,
                },
                ResponseItem::GetTransactions { txn_list_with_proof },
            ) => {
                let txns = &txn_list_with_proof.transactions;
                if txns.len() as u64 > *limit {
                    return Err(inconsistent(format!(
                        "{} transactions returned for limit {}",
                        txns.len(),
                        limit
                    )));
                }
                if !txns.is_empty()
                    && txn_list_with_proof.first_transaction_version != Some(*start_version)
                {
                    return Err(inconsistent(format!(
                        "transaction list does not start at version {}",
                        start_version
                    )));
                }
                if *fetch_events {
                    if let Some(events) = &txn_list_with_proof.events_for_versions {
                        if events.len() != txns.len() {
                            return Err(inconsistent(
                                "event lists do not line up with transactions".to_string(),
                            ));
                        }
                    }
                }
            }
            (
                RequestItem::GetAccountTransactionBySequenceNumber {
                    account,
                    sequence_number,
                    ..
                },
                ResponseItem::GetAccountTransactionBySequenceNumber {
                    signed_transaction_with_proof: Some(txn),
                    ..
                },
            ) => {
                let signed = &txn.signed_transaction;
                if signed.sender() != *account || signed.sequence_number() != *sequence_number {
                    return Err(inconsistent(format!(
                        "transaction {}:{} returned for {}:{}",
                        signed.sender(),
                        signed.sequence_number(),
                        account,
                        sequence_number
                    )));
                }
                if txn.version > ledger_version {
                    return Err(inconsistent(format!(
                        "transaction version {} is ahead of ledger version {}",
                        txn.version, ledger_version
                    )));
                }
            }
            (
                RequestItem::GetEventsByAccessPath {
                    access_path,
                    start_event_seq_num,
                    ascending,
                    limit,
                },
                ResponseItem::GetEventsByAccessPath {
                    events_with_proof, ..
                },
            ) => {
                if events_with_proof.len() as u64 > *limit {
                    return Err(inconsistent(format!(
                        "{} events returned for limit {}",
                        events_with_proof.len(),
                        limit
                    )));
                }
                let mut previous: Option<u64> = None;
                for ewp in events_with_proof {
                    let event = &ewp.event;
                    if event.access_path != *access_path {
                        return Err(inconsistent("event from another access path".to_string()));
                    }
                    let seq = event.sequence_number;
                    let in_order = match (previous, *ascending) {
                        (None, true) => seq >= *start_event_seq_num,
                        (None, false) => seq <= *start_event_seq_num,
                        (Some(prev), true) => seq > prev,
                        (Some(prev), false) => seq < prev,
                    };
                    if !in_order {
                        return Err(inconsistent(format!(
                            "event sequence number {} out of order",
                            seq
                        )));
                    }
                    previous = Some(seq);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl LedgerVerifier for QuorumVerifier {
    fn verify(
        &self,
        validators: &ValidatorVerifier,
        request: &UpdateToLatestLedgerRequest,
        response: &UpdateToLatestLedgerResponse,
    ) -> Result<(), VerifyError> {
        let ledger_info = &response.ledger_info_with_sigs;
        if ledger_info.version < request.client_known_version {
            return Err(VerifyError::StaleLedger {
                known: request.client_known_version,
                actual: ledger_info.version,
            });
        }

        Self::verify_signatures(validators, ledger_info)?;

        if request.requested_items.len() != response.response_items.len() {
            return Err(VerifyError::ItemCountMismatch {
                expected: request.requested_items.len(),
                actual: response.response_items.len(),
            });
        }

        for (index, (req, resp)) in request
            .requested_items
            .iter()
            .zip(&response.response_items)
            .enumerate()
        {
            if !resp.answers(req) {
                return Err(VerifyError::ShapeMismatch {
                    index,
                    expected: req.kind(),
                    actual: resp.kind(),
                });
            }
            Self::verify_item(index, req, resp, ledger_info.version)?;
        }
        Ok(())
    }
}
