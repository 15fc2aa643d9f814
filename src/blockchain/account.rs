//! Account state resolution.
//!
//! Every call re-reads the latest ledger; nothing is cached, so a sequence
//! number is never stale when a transaction is built from it.

use crate::blockchain::client::LibraClient;
use crate::blockchain::types::{ClientError, ClientResult};
use crate::ledger::{account_resource_path, AccountResource, AccountState, AccountStateBlob, Address};
use crate::transport::AdmissionControl;
use crate::verification::LedgerVerifier;

impl<T: AdmissionControl, V: LedgerVerifier> LibraClient<T, V> {
    /// Raw account state blob and the version it was read at.
    pub async fn get_account_blob(
        &self,
        address: Address,
    ) -> ClientResult<(Option<AccountStateBlob>, u64)> {
        let (state, _) = self.get_account_state_with_proof(address).await?;
        Ok((state.blob, state.version))
    }

    /// Decoded account state. Fails with `Account` if the account does not exist.
    pub async fn get_account_state(&self, address: Address) -> ClientResult<AccountState> {
        let (blob, version) = self.get_account_blob(address).await?;
        let blob = blob.filter(|b| !b.is_empty()).ok_or_else(|| {
            ClientError::Account(format!("Account state blob is empty for {}", address))
        })?;
        tracing::debug!(%address, version, "Account state fetched");
        Ok(AccountState::from_blob(&blob)?)
    }

    pub async fn get_account_resource(&self, address: Address) -> ClientResult<AccountResource> {
        let state = self.get_account_state(address).await?;
        let raw = state.get(&account_resource_path()).ok_or_else(|| {
            ClientError::Decode(format!("account resource missing from state of {}", address))
        })?;
        Ok(AccountResource::from_bytes(raw)?)
    }

    pub async fn get_sequence_number(&self, address: Address) -> ClientResult<u64> {
        Ok(self.get_account_resource(address).await?.sequence_number)
    }

    pub async fn get_balance(&self, address: Address) -> ClientResult<u64> {
        Ok(self.get_account_resource(address).await?.balance)
    }
}
