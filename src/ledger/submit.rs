//! Admission-control submission envelope and its classification.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTransactionRequest {
    /// Canonical bytes of a `SignedTransaction`.
    pub signed_txn: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissionControlStatusCode {
    Accepted,
    Blacklisted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionControlStatus {
    pub code: AdmissionControlStatusCode,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmStatus {
    pub major_status: u64,
    #[serde(default)]
    pub sub_status: Option<u64>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MempoolStatusCode {
    Valid,
    InsufficientBalance,
    InvalidSeqNumber,
    MempoolIsFull,
    TooManyTransactions,
    InvalidUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MempoolStatus {
    pub code: MempoolStatusCode,
    #[serde(default)]
    pub message: String,
}

/// The server's one-of status field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    AdmissionControl(AdmissionControlStatus),
    Vm(VmStatus),
    Mempool(MempoolStatus),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitTransactionResponse {
    pub status: Option<SubmissionStatus>,
    #[serde(default)]
    pub validator_id: Option<String>,
}

/// Classified result of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SubmitOutcome {
    Accepted,
    RejectedByAdmission(AdmissionControlStatus),
    RejectedByExecution(VmStatus),
    RejectedByMempool(MempoolStatus),
    /// The server left the status unset.
    Unknown,
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::RejectedByAdmission(_) => "rejected_by_admission",
            Self::RejectedByExecution(_) => "rejected_by_execution",
            Self::RejectedByMempool(_) => "rejected_by_mempool",
            Self::Unknown => "unknown",
        }
    }
}

impl From<&SubmitTransactionResponse> for SubmitOutcome {
    fn from(response: &SubmitTransactionResponse) -> Self {
        match &response.status {
            Some(SubmissionStatus::AdmissionControl(status))
                if status.code == AdmissionControlStatusCode::Accepted =>
            {
                Self::Accepted
            }
            Some(SubmissionStatus::AdmissionControl(status)) => {
                Self::RejectedByAdmission(status.clone())
            }
            Some(SubmissionStatus::Vm(status)) => Self::RejectedByExecution(status.clone()),
            Some(SubmissionStatus::Mempool(status)) => Self::RejectedByMempool(status.clone()),
            None => Self::Unknown,
        }
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::RejectedByAdmission(s) => {
                write!(f, "admission control status {:?} {}", s.code, s.message)
            }
            Self::RejectedByExecution(s) => {
                write!(f, "vm status {}", s.major_status)?;
                if let Some(sub) = s.sub_status {
                    write!(f, "/{}", sub)?;
                }
                write!(f, " {}", s.message)
            }
            Self::RejectedByMempool(s) => write!(f, "mempool status {:?} {}", s.code, s.message),
            Self::Unknown => write!(f, "unknown error: submission status unset"),
        }
    }
}
