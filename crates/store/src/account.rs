use revm::{
    primitives::{HashMap, U256},
    state::AccountInfo,
};

/// Account as held by the store: basic info plus its full storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreAccount {
    /// Balance, nonce and code.
    pub info: AccountInfo,
    /// Storage slots. Zero values may be present and are skipped when hashing.
    pub storage: HashMap<U256, U256>,
}

impl StoreAccount {
    /// Empty in the EIP-161 sense: zero nonce, zero balance and no code.
    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }
}
