//! Raw and signed transactions.

use serde::{Deserialize, Serialize};

use crate::ledger::address::Address;

/// What a transaction does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionPayload {
    /// Move `amount` micro-coins from the sender to `receiver`.
    PeerToPeerTransfer { receiver: Address, amount: u64 },
}

/// Unsigned transaction; immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub sender: Address,
    pub sequence_number: u64,
    pub payload: TransactionPayload,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    /// Seconds since the Unix epoch.
    pub expiration_time: u64,
}

impl RawTransaction {
    /// Build a peer-to-peer payment.
    #[allow(clippy::too_many_arguments)]
    pub fn transfer(
        sender: Address,
        sequence_number: u64,
        receiver: Address,
        amount: u64,
        max_gas_amount: u64,
        gas_unit_price: u64,
        expiration_time: u64,
    ) -> Self {
        Self {
            sender,
            sequence_number,
            payload: TransactionPayload::PeerToPeerTransfer { receiver, amount },
            max_gas_amount,
            gas_unit_price,
            expiration_time,
        }
    }

    /// Canonical bytes a signer signs over.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }
}

/// Raw transaction plus the sender's signature and public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub raw_txn: RawTransaction,
    pub public_key: Vec<u8>,
    pub signature: Vec<u8>,
}

impl SignedTransaction {
    pub fn sender(&self) -> Address {
        self.raw_txn.sender
    }

    pub fn sequence_number(&self) -> u64 {
        self.raw_txn.sequence_number
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

/// Produces signed transactions. Key material stays with the implementor.
pub trait TransactionSigner {
    type Error: std::fmt::Display;

    fn sign(&self, raw_txn: RawTransaction) -> Result<SignedTransaction, Self::Error>;
}
