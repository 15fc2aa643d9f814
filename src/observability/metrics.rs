//! Client metrics.
//!
//! # Metrics
//! - `libra_client_rpc_total` (counter): ledger RPCs by operation, outcome
//! - `libra_client_submissions_total` (counter): submissions by outcome
//! - `libra_client_poll_attempts_total` (counter): confirmation polls

pub fn record_rpc(operation: &'static str, outcome: &'static str) {
    ::metrics::counter!("libra_client_rpc_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}

pub fn record_submission(outcome: &'static str) {
    ::metrics::counter!("libra_client_submissions_total", "outcome" => outcome).increment(1);
}

pub fn record_poll_attempt() {
    ::metrics::counter!("libra_client_poll_attempts_total").increment(1);
}
