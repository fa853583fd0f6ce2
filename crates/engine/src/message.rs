use revm::primitives::{Address, Bytes, U256};

/// A transaction ready to be applied: sender already recovered, every
/// per-subtest choice already made.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    /// Sender, recovered from the secret key.
    pub caller: Address,
    /// Recipient, `None` for contract creation.
    pub to: Option<Address>,
    /// Sender nonce the message claims.
    pub nonce: u64,
    /// Wei transferred to the recipient.
    pub value: U256,
    /// Gas the message may use.
    pub gas_limit: u64,
    /// Gas price, or the fee cap for EIP-1559 messages.
    pub gas_price: U256,
    /// Priority fee. Present only for EIP-1559 messages.
    pub gas_priority_fee: Option<U256>,
    /// Call data, or init code for creations.
    pub data: Bytes,
    /// Check the sender nonce and that it can pay for gas.
    pub enforce_checks: bool,
}

impl Message {
    /// Returns true if the message creates a contract.
    pub fn is_create(&self) -> bool {
        self.to.is_none()
    }
}
