use crate::{
    state_merkle_trie_root, DumpAccount, SnapshotId, StateDump, StateStore, StoreAccount,
};
use revm::{
    primitives::{Address, HashMap, HashSet, B256, KECCAK_EMPTY, U256},
    state::{AccountInfo, Bytecode},
};

/// Accounts together with the bookkeeping needed to finalize them.
#[derive(Clone, Debug, Default)]
struct Accounts {
    accounts: HashMap<Address, StoreAccount>,
    /// Touched since the last commit.
    touched: HashSet<Address>,
    /// Self-destructed since the last commit.
    destructed: HashSet<Address>,
}

impl Accounts {
    fn is_removed(&self, address: &Address, account: &StoreAccount, delete_empty: bool) -> bool {
        self.destructed.contains(address)
            || (delete_empty && self.touched.contains(address) && account.is_empty())
    }
}

/// [`StateStore`] kept entirely in memory.
///
/// Snapshots are full copies of the account set, which is fine for the few
/// accounts a state test allocates. Contract code is content addressed and
/// survives reverts.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    state: Accounts,
    contracts: HashMap<B256, Bytecode>,
    snapshots: Vec<Accounts>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts currently held, including ones pending removal.
    pub fn len(&self) -> usize {
        self.state.accounts.len()
    }

    /// Returns true if the store holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.state.accounts.is_empty()
    }

    fn account_mut(&mut self, address: Address) -> &mut StoreAccount {
        self.state.touched.insert(address);
        self.state.accounts.entry(address).or_default()
    }
}

impl StateStore for InMemoryStore {
    fn account(&self, address: Address) -> Option<AccountInfo> {
        self.state
            .accounts
            .get(&address)
            .map(|account| account.info.clone())
    }

    fn code_by_hash(&self, code_hash: B256) -> Option<Bytecode> {
        if code_hash == KECCAK_EMPTY {
            return Some(Bytecode::default());
        }
        self.contracts.get(&code_hash).cloned()
    }

    fn storage(&self, address: Address, key: U256) -> U256 {
        self.state
            .accounts
            .get(&address)
            .and_then(|account| account.storage.get(&key).copied())
            .unwrap_or_default()
    }

    fn touch(&mut self, address: Address) {
        self.account_mut(address);
    }

    fn set_code(&mut self, address: Address, code: Bytecode) {
        let code_hash = code.hash_slow();
        if code_hash != KECCAK_EMPTY {
            self.contracts.insert(code_hash, code.clone());
        }
        let account = self.account_mut(address);
        account.info.code_hash = code_hash;
        account.info.code = Some(code);
    }

    fn set_nonce(&mut self, address: Address, nonce: u64) {
        self.account_mut(address).info.nonce = nonce;
    }

    fn set_balance(&mut self, address: Address, balance: U256) {
        self.account_mut(address).info.balance = balance;
    }

    fn add_balance(&mut self, address: Address, amount: U256) {
        let account = self.account_mut(address);
        account.info.balance = account.info.balance.saturating_add(amount);
    }

    fn set_storage(&mut self, address: Address, key: U256, value: U256) {
        self.account_mut(address).storage.insert(key, value);
    }

    fn clear_storage(&mut self, address: Address) {
        self.account_mut(address).storage.clear();
    }

    fn self_destruct(&mut self, address: Address) {
        self.state.destructed.insert(address);
    }

    fn snapshot(&mut self) -> SnapshotId {
        self.snapshots.push(self.state.clone());
        self.snapshots.len() - 1
    }

    fn revert_to_snapshot(&mut self, id: SnapshotId) {
        if id >= self.snapshots.len() {
            return;
        }
        self.snapshots.truncate(id + 1);
        if let Some(state) = self.snapshots.pop() {
            self.state = state;
        }
    }

    fn commit(&mut self, delete_empty: bool) -> B256 {
        let Accounts {
            accounts,
            touched,
            destructed,
        } = &mut self.state;

        for address in destructed.drain() {
            accounts.remove(&address);
        }
        for address in touched.drain() {
            if delete_empty && accounts.get(&address).is_some_and(StoreAccount::is_empty) {
                accounts.remove(&address);
            }
        }
        self.snapshots.clear();

        state_merkle_trie_root(&self.state.accounts)
    }

    fn intermediate_root(&self, delete_empty: bool) -> B256 {
        state_merkle_trie_root(
            self.state
                .accounts
                .iter()
                .filter(|(address, account)| !self.state.is_removed(address, account, delete_empty)),
        )
    }

    fn dump(&self) -> StateDump {
        StateDump {
            root: state_merkle_trie_root(&self.state.accounts),
            accounts: self
                .state
                .accounts
                .iter()
                .map(|(address, account)| (*address, DumpAccount::from(account)))
                .collect(),
        }
    }
}
