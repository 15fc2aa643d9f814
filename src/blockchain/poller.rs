//! Confirmation polling.
//!
//! # State Machine
//! ```text
//! Polling ──(transaction stored)──────────────→ Confirmed(has_events)
//!    │ ────(expiration <= ledger time)────────→ Expired
//!    │ ────(attempt budget spent)─────────────→ Exhausted
//!    └─────(otherwise, one attempt used)──────→ Polling
//! ```
//!
//! The transaction's expiration time is the authoritative deadline; the
//! attempt budget bounds wall-clock time if the ledger clock stalls.

use tokio::time::sleep;

use crate::blockchain::client::LibraClient;
use crate::blockchain::types::{ClientError, ClientResult, TimeoutKind};
use crate::ledger::{Address, SignedTransactionWithProof};
use crate::observability::metrics;
use crate::transport::AdmissionControl;
use crate::verification::LedgerVerifier;

/// Where a confirmation wait stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Polling { attempts_left: u32 },
    /// Stored on-chain; `has_events` is false when nothing was emitted.
    Confirmed { has_events: bool },
    Expired { ledger_time_secs: u64 },
    Exhausted,
}

impl PollState {
    pub fn start(max_attempts: u32) -> Self {
        PollState::Polling {
            attempts_left: max_attempts,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Polling { .. })
    }

    /// Next state after one poll observed `stored` at `ledger_time_secs`.
    pub fn advance(
        self,
        stored: Option<&SignedTransactionWithProof>,
        expiration_time: u64,
        ledger_time_secs: u64,
    ) -> Self {
        let PollState::Polling { attempts_left } = self else {
            return self;
        };

        if let Some(txn) = stored {
            return PollState::Confirmed {
                has_events: txn.event_count() > 0,
            };
        }
        if expiration_time <= ledger_time_secs {
            return PollState::Expired { ledger_time_secs };
        }
        match attempts_left.saturating_sub(1) {
            0 => PollState::Exhausted,
            attempts_left => PollState::Polling { attempts_left },
        }
    }
}

impl<T: AdmissionControl, V: LedgerVerifier> LibraClient<T, V> {
    /// Poll until `(address, sequence_number)` is stored, it expires, or the
    /// attempt budget runs out.
    ///
    /// Returns `true` if the stored transaction emitted events, `false` if it
    /// emitted none.
    pub async fn wait_for_transaction(
        &self,
        address: Address,
        sequence_number: u64,
        expiration_time: u64,
    ) -> ClientResult<bool> {
        let max_attempts = self.polling.max_attempts;
        let interval = self.polling.interval();
        let mut state = PollState::start(max_attempts);

        tracing::info!(%address, sequence_number, expiration_time, "Waiting for transaction");

        loop {
            match state {
                PollState::Polling { attempts_left } => {
                    sleep(interval).await;
                    metrics::record_poll_attempt();

                    let (stored, ledger_info) = self
                        .get_account_transaction_with_proof(address, sequence_number, true)
                        .await?;
                    state = state.advance(
                        stored.as_ref(),
                        expiration_time,
                        ledger_info.timestamp_secs(),
                    );

                    if !state.is_terminal() {
                        tracing::info!(
                            %address,
                            sequence_number,
                            attempts_left = attempts_left - 1,
                            "Transaction pending"
                        );
                    }
                }
                PollState::Confirmed { has_events } => {
                    if has_events {
                        tracing::info!(%address, sequence_number, "Transaction is stored");
                    } else {
                        tracing::warn!(%address, sequence_number, "Transaction stored but no events emitted");
                    }
                    return Ok(has_events);
                }
                PollState::Expired { ledger_time_secs } => {
                    return Err(ClientError::TransactionTimeout(TimeoutKind::Expired {
                        expiration_time,
                        ledger_time_secs,
                    }));
                }
                PollState::Exhausted => {
                    return Err(ClientError::TransactionTimeout(
                        TimeoutKind::AttemptsExhausted {
                            attempts: max_attempts,
                        },
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Proof, RawTransaction, SignedTransaction};

    fn stored(events: Option<usize>) -> SignedTransactionWithProof {
        let raw = RawTransaction::transfer(
            Address::new([0xAA; 32]),
            5,
            Address::new([0xBB; 32]),
            100,
            140_000,
            0,
            1_000,
        );
        let event = crate::ledger::Event {
            access_path: crate::ledger::AccessPath::new(Address::new([0xAA; 32]), vec![1]),
            sequence_number: 0,
            data: Vec::new(),
        };
        SignedTransactionWithProof {
            version: 1,
            signed_transaction: SignedTransaction {
                raw_txn: raw,
                public_key: Vec::new(),
                signature: Vec::new(),
            },
            proof: Proof::default(),
            events: events.map(|n| vec![event; n]),
        }
    }

    #[test]
    fn test_confirmed_with_and_without_events() {
        let state = PollState::start(3);
        assert_eq!(
            state.advance(Some(&stored(Some(1))), 100, 0),
            PollState::Confirmed { has_events: true }
        );
        assert_eq!(
            state.advance(Some(&stored(Some(0))), 100, 0),
            PollState::Confirmed { has_events: false }
        );
        assert_eq!(
            state.advance(Some(&stored(None)), 100, 0),
            PollState::Confirmed { has_events: false }
        );
    }

    #[test]
    fn test_confirmation_wins_over_expiration() {
        let state = PollState::start(3);
        assert_eq!(
            state.advance(Some(&stored(Some(1))), 10, 20),
            PollState::Confirmed { has_events: true }
        );
    }

    #[test]
    fn test_expiration_boundary_is_inclusive() {
        let state = PollState::start(3);
        assert_eq!(
            state.advance(None, 50, 50),
            PollState::Expired { ledger_time_secs: 50 }
        );
        assert_eq!(
            state.advance(None, 51, 50),
            PollState::Polling { attempts_left: 2 }
        );
    }

    #[test]
    fn test_budget_exhaustion() {
        let mut state = PollState::start(2);
        state = state.advance(None, u64::MAX, 0);
        assert_eq!(state, PollState::Polling { attempts_left: 1 });
        state = state.advance(None, u64::MAX, 0);
        assert_eq!(state, PollState::Exhausted);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_terminal_states_do_not_advance() {
        let state = PollState::Expired { ledger_time_secs: 1 };
        assert_eq!(state.advance(Some(&stored(Some(1))), 0, 0), state);
    }
}
