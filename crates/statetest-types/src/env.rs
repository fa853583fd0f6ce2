use engine::{vm_test_block_hash, ExecutionContext};
use revm::primitives::{Address, B256, U256};
use serde::Deserialize;

/// Block environment of a test unit. Fields not listed here are ignored.
#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Env {
    /// Block beneficiary.
    pub current_coinbase: Address,
    /// Block difficulty, zero when absent.
    #[serde(default)]
    pub current_difficulty: U256,
    /// Block gas limit.
    pub current_gas_limit: U256,
    /// Block number.
    pub current_number: U256,
    /// Block timestamp.
    pub current_timestamp: U256,
    /// EIP-1559 base fee, London and later.
    pub current_base_fee: Option<U256>,
    /// `PREVRANDAO` value, Paris and later.
    pub current_random: Option<B256>,
    /// Parsed but unused. `BLOCKHASH` answers with a synthetic hash.
    pub previous_hash: Option<B256>,
}

impl Env {
    /// Block number, saturated to `u64`.
    pub fn number(&self) -> u64 {
        self.current_number.saturating_to()
    }

    /// Block timestamp, saturated to `u64`.
    pub fn timestamp(&self) -> u64 {
        self.current_timestamp.saturating_to()
    }

    /// Execution context of this block. `BLOCKHASH` is answered by
    /// [`vm_test_block_hash`].
    pub fn context(&self) -> ExecutionContext {
        ExecutionContext {
            coinbase: self.current_coinbase,
            difficulty: self.current_difficulty,
            gas_limit: self.current_gas_limit.saturating_to(),
            number: self.number(),
            timestamp: self.timestamp(),
            base_fee: self.current_base_fee.unwrap_or_default().saturating_to(),
            prevrandao: self.current_random,
            block_hash: vm_test_block_hash,
        }
    }
}
