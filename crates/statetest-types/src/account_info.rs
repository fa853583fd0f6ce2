use revm::primitives::{Bytes, HashMap, U256};
use serde::Deserialize;

use crate::deserializer::deserialize_str_as_u64;

/// Pre-state account.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// Balance in wei.
    pub balance: U256,
    /// Account code, empty for externally owned accounts.
    pub code: Bytes,
    /// Account nonce.
    #[serde(deserialize_with = "deserialize_str_as_u64")]
    pub nonce: u64,
    /// Storage slots.
    pub storage: HashMap<U256, U256>,
}
