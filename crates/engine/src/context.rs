use revm::primitives::{keccak256, Address, B256, U256};

/// Resolves the hash of a block by number.
pub type BlockHashFn = fn(u64) -> B256;

/// Block level environment a message executes in.
#[derive(Clone, Copy, Debug)]
pub struct ExecutionContext {
    /// Beneficiary of the gas fees.
    pub coinbase: Address,
    /// Block difficulty, ignored once `prevrandao` is in use.
    pub difficulty: U256,
    /// Block gas limit.
    pub gas_limit: u64,
    /// Block number.
    pub number: u64,
    /// Block timestamp in seconds.
    pub timestamp: u64,
    /// EIP-1559 base fee, zero before London.
    pub base_fee: u64,
    /// Post-merge randomness, replaces difficulty from Paris on.
    pub prevrandao: Option<B256>,
    /// Answers `BLOCKHASH`.
    pub block_hash: BlockHashFn,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self {
            coinbase: Address::ZERO,
            difficulty: U256::ZERO,
            gas_limit: u64::MAX,
            number: 0,
            timestamp: 0,
            base_fee: 0,
            prevrandao: None,
            block_hash: vm_test_block_hash,
        }
    }
}

/// Synthetic block hash used by VM and state tests: the keccak256 of the
/// block number's decimal representation.
pub fn vm_test_block_hash(number: u64) -> B256 {
    keccak256(number.to_string())
}
