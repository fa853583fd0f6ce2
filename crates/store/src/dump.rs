use crate::{storage_root, StoreAccount};
use revm::primitives::{Address, Bytes, B256, U256};
use serde::Serialize;
use std::collections::BTreeMap;

/// Full account and storage dump of a store, ordered by address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StateDump {
    /// State root of the dumped accounts.
    pub root: B256,
    /// Accounts by address.
    pub accounts: BTreeMap<Address, DumpAccount>,
}

/// Single account in a [`StateDump`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpAccount {
    /// Balance in wei.
    pub balance: U256,
    /// Account nonce.
    pub nonce: u64,
    /// Storage root.
    pub root: B256,
    /// Keccak256 of the code.
    pub code_hash: B256,
    /// Code, left out when empty.
    #[serde(skip_serializing_if = "is_empty_code")]
    pub code: Bytes,
    /// Non-zero storage slots.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub storage: BTreeMap<B256, B256>,
}

impl From<&StoreAccount> for DumpAccount {
    fn from(account: &StoreAccount) -> Self {
        Self {
            balance: account.info.balance,
            nonce: account.info.nonce,
            root: storage_root(&account.storage),
            code_hash: account.info.code_hash,
            code: account
                .info
                .code
                .as_ref()
                .map(|code| code.original_bytes())
                .unwrap_or_default(),
            storage: account
                .storage
                .iter()
                .filter(|(_, value)| !value.is_zero())
                .map(|(key, value)| (B256::from(*key), B256::from(*value)))
                .collect(),
        }
    }
}

fn is_empty_code(code: &Bytes) -> bool {
    code.is_empty()
}
