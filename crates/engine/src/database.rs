use crate::BlockHashFn;
use core::convert::Infallible;
use revm::{
    database_interface::{Database, DatabaseCommit},
    primitives::{Address, HashMap, B256, U256},
    state::{Account, AccountInfo, Bytecode},
};
use store::StateStore;

/// Exposes a [`StateStore`] to revm as a [`Database`].
///
/// Reads go straight to the store. [`DatabaseCommit::commit`] writes the
/// journaled changes of a transaction back through the store's mutators so
/// touched and self-destructed accounts are tracked by the store.
pub struct StoreDatabase<'a, S> {
    store: &'a mut S,
    block_hash: BlockHashFn,
}

impl<S> core::fmt::Debug for StoreDatabase<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StoreDatabase").finish_non_exhaustive()
    }
}

impl<'a, S: StateStore> StoreDatabase<'a, S> {
    /// Wraps `store`, answering `BLOCKHASH` with `block_hash`.
    pub fn new(store: &'a mut S, block_hash: BlockHashFn) -> Self {
        Self { store, block_hash }
    }

    fn commit_account(&mut self, address: Address, account: Account) {
        if account.is_selfdestructed() {
            self.store.self_destruct(address);
            return;
        }

        if account.is_created() {
            self.store.clear_storage(address);
        }

        let current_code_hash = self
            .store
            .account(address)
            .map(|info| info.code_hash)
            .unwrap_or_default();
        if current_code_hash != account.info.code_hash {
            let code = account
                .info
                .code
                .clone()
                .or_else(|| self.store.code_by_hash(account.info.code_hash))
                .unwrap_or_default();
            self.store.set_code(address, code);
        }

        self.store.set_nonce(address, account.info.nonce);
        self.store.set_balance(address, account.info.balance);
        for (key, slot) in account.changed_storage_slots() {
            self.store.set_storage(address, *key, slot.present_value());
        }
    }
}

impl<S: StateStore> Database for StoreDatabase<'_, S> {
    type Error = Infallible;

    fn basic(&mut self, address: Address) -> Result<Option<AccountInfo>, Self::Error> {
        Ok(self.store.account(address))
    }

    fn code_by_hash(&mut self, code_hash: B256) -> Result<Bytecode, Self::Error> {
        Ok(self.store.code_by_hash(code_hash).unwrap_or_default())
    }

    fn storage(&mut self, address: Address, index: U256) -> Result<U256, Self::Error> {
        Ok(self.store.storage(address, index))
    }

    fn block_hash(&mut self, number: u64) -> Result<B256, Self::Error> {
        Ok((self.block_hash)(number))
    }
}

impl<S: StateStore> DatabaseCommit for StoreDatabase<'_, S> {
    fn commit(&mut self, changes: HashMap<Address, Account>) {
        for (address, account) in changes {
            if !account.is_touched() {
                continue;
            }
            self.commit_account(address, account);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm_test_block_hash;
    use revm::{
        primitives::{address, bytes, KECCAK_EMPTY},
        state::EvmStorageSlot,
    };
    use store::InMemoryStore;

    const ALICE: Address = address!("a94f5374fce5edbc8e2a8697c15331677e6ebf0b");

    fn touched(info: AccountInfo) -> Account {
        let mut account = Account::from(info);
        account.mark_touch();
        account
    }

    #[test]
    fn reads_come_from_the_store() {
        let mut store = InMemoryStore::new();
        store.set_balance(ALICE, U256::from(7));
        store.set_storage(ALICE, U256::from(1), U256::from(2));
        store.commit(false);

        let mut db = StoreDatabase::new(&mut store, vm_test_block_hash);
        assert_eq!(db.basic(ALICE).unwrap().unwrap().balance, U256::from(7));
        assert_eq!(db.basic(Address::ZERO).unwrap(), None);
        assert_eq!(db.storage(ALICE, U256::from(1)).unwrap(), U256::from(2));
        assert_eq!(db.block_hash(3).unwrap(), vm_test_block_hash(3));
        assert!(db.code_by_hash(KECCAK_EMPTY).unwrap().is_empty());
    }

    #[test]
    fn commit_writes_touched_accounts_only() {
        let mut store = InMemoryStore::new();
        let mut db = StoreDatabase::new(&mut store, vm_test_block_hash);

        let mut changed = touched(AccountInfo::from_balance(U256::from(5)));
        changed.storage.insert(
            U256::from(1),
            EvmStorageSlot::new_changed(U256::ZERO, U256::from(9), 0),
        );
        let untouched = Account::from(AccountInfo::from_balance(U256::from(1)));

        let mut changes = HashMap::default();
        changes.insert(ALICE, changed);
        changes.insert(Address::ZERO, untouched);
        db.commit(changes);

        assert_eq!(store.account(ALICE).unwrap().balance, U256::from(5));
        assert_eq!(store.storage(ALICE, U256::from(1)), U256::from(9));
        assert!(!store.exists(Address::ZERO));
    }

    #[test]
    fn commit_sets_code_and_self_destructs() {
        let mut store = InMemoryStore::new();
        let code = Bytecode::new_raw(bytes!("33ff"));
        let info = AccountInfo::default().with_code(code.clone());

        let mut db = StoreDatabase::new(&mut store, vm_test_block_hash);
        let mut changes = HashMap::default();
        changes.insert(ALICE, touched(info.clone()));
        db.commit(changes);
        assert_eq!(store.account(ALICE).unwrap().code_hash, code.hash_slow());

        let mut destructed = touched(info);
        destructed.mark_selfdestruct();
        let mut db = StoreDatabase::new(&mut store, vm_test_block_hash);
        let mut changes = HashMap::default();
        changes.insert(ALICE, destructed);
        db.commit(changes);

        store.commit(false);
        assert!(!store.exists(ALICE));
    }
}
