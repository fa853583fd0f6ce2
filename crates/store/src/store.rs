use crate::StateDump;
use revm::{
    primitives::{Address, B256, U256},
    state::{AccountInfo, Bytecode},
};

/// Identifier returned by [`StateStore::snapshot`].
pub type SnapshotId = usize;

/// Account/storage state the execution engine applies messages against.
///
/// Every mutation touches the account, creating it empty if it does not
/// exist yet. Touched and self-destructed accounts are finalized by
/// [`StateStore::commit`]: self-destructed accounts are removed, and when
/// `delete_empty` is set so are touched accounts that ended up empty.
pub trait StateStore {
    /// Returns account info with code attached, or `None` if the account does not exist.
    fn account(&self, address: Address) -> Option<AccountInfo>;

    /// Returns the bytecode with the given hash.
    fn code_by_hash(&self, code_hash: B256) -> Option<Bytecode>;

    /// Returns the value of a storage slot, zero if unset.
    fn storage(&self, address: Address, key: U256) -> U256;

    /// Returns true if the account exists.
    fn exists(&self, address: Address) -> bool {
        self.account(address).is_some()
    }

    /// Marks the account as touched, creating it if needed.
    fn touch(&mut self, address: Address);

    /// Replaces the account code.
    fn set_code(&mut self, address: Address, code: Bytecode);

    /// Sets the account nonce.
    fn set_nonce(&mut self, address: Address, nonce: u64);

    /// Sets the account balance.
    fn set_balance(&mut self, address: Address, balance: U256);

    /// Adds `amount` to the account balance. A zero amount still touches the account.
    fn add_balance(&mut self, address: Address, amount: U256);

    /// Sets a single storage slot.
    fn set_storage(&mut self, address: Address, key: U256, value: U256);

    /// Wipes all storage of the account.
    fn clear_storage(&mut self, address: Address);

    /// Marks the account for removal on the next commit.
    fn self_destruct(&mut self, address: Address);

    /// Takes a snapshot of the current state.
    fn snapshot(&mut self) -> SnapshotId;

    /// Restores the state captured by `id`, discarding it and every later snapshot.
    fn revert_to_snapshot(&mut self, id: SnapshotId);

    /// Finalizes pending removals and returns the new state root.
    ///
    /// Invalidates all snapshots.
    fn commit(&mut self, delete_empty: bool) -> B256;

    /// Returns the root the state would have after [`StateStore::commit`],
    /// without finalizing anything.
    fn intermediate_root(&self, delete_empty: bool) -> B256;

    /// Dumps every live account with its storage.
    fn dump(&self) -> StateDump;
}
