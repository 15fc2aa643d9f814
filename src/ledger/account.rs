//! Account state and the account resource stored in it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Tag prefixing resource paths inside account state.
pub const RESOURCE_TAG: u8 = 1;

const ACCOUNT_RESOURCE_NAME: &[u8] = b"0x0::LibraAccount::T";
const SENT_EVENTS_SUFFIX: &[u8] = b"/sent_events_count/";
const RECEIVED_EVENTS_SUFFIX: &[u8] = b"/received_events_count/";

/// Key of the account resource inside an account's state.
pub fn account_resource_path() -> Vec<u8> {
    let mut path = vec![RESOURCE_TAG];
    path.extend_from_slice(&Sha256::digest(ACCOUNT_RESOURCE_NAME));
    path
}

/// Path of the account's sent-payment event stream.
pub fn account_sent_event_path() -> Vec<u8> {
    let mut path = account_resource_path();
    path.extend_from_slice(SENT_EVENTS_SUFFIX);
    path
}

/// Path of the account's received-payment event stream.
pub fn account_received_event_path() -> Vec<u8> {
    let mut path = account_resource_path();
    path.extend_from_slice(RECEIVED_EVENTS_SUFFIX);
    path
}

/// Encoded account state as returned by the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStateBlob(pub Vec<u8>);

impl AccountStateBlob {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Decoded account state: resource path → encoded resource.
///
/// Entries keep their encoded order; lookups are by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountState {
    entries: IndexMap<Vec<u8>, Vec<u8>>,
}

impl AccountState {
    pub fn from_blob(blob: &AccountStateBlob) -> Result<Self, bincode::Error> {
        let pairs: Vec<(Vec<u8>, Vec<u8>)> = bincode::deserialize(&blob.0)?;
        Ok(Self {
            entries: pairs.into_iter().collect(),
        })
    }

    pub fn to_blob(&self) -> Result<AccountStateBlob, bincode::Error> {
        let pairs: Vec<(&Vec<u8>, &Vec<u8>)> = self.entries.iter().collect();
        Ok(AccountStateBlob(bincode::serialize(&pairs)?))
    }

    pub fn insert(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.entries.insert(key, value);
    }

    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.keys().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Event counter and stream key embedded in the account resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventHandle {
    pub count: u64,
    pub key: Vec<u8>,
}

/// Decoded account resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResource {
    pub authentication_key: Vec<u8>,
    pub balance: u64,
    pub delegated_key_rotation_capability: bool,
    pub delegated_withdrawal_capability: bool,
    pub received_events: EventHandle,
    pub sent_events: EventHandle,
    pub sequence_number: u64,
}

impl AccountResource {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Wrap this resource into a single-entry account state blob.
    pub fn to_state_blob(&self) -> Result<AccountStateBlob, bincode::Error> {
        let mut state = AccountState::default();
        state.insert(account_resource_path(), self.to_bytes()?);
        state.to_blob()
    }
}
