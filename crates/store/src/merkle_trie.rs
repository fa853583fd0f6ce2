//! Secure Merkle Patricia trie roots for accounts, storage and logs.

use crate::StoreAccount;
use alloy_primitives::Log;
use alloy_rlp::RlpEncodable;
use hash_db::Hasher;
use plain_hasher::PlainHasher;
use revm::primitives::{keccak256, Address, HashMap, B256, U256};
use triehash::sec_trie_root;

/// Keccak256 of the RLP list of logs.
pub fn log_rlp_hash(logs: &[Log]) -> B256 {
    let mut out = Vec::with_capacity(alloy_rlp::list_length(logs));
    alloy_rlp::encode_list(logs, &mut out);
    keccak256(&out)
}

/// State root of the given accounts.
pub fn state_merkle_trie_root<'a>(
    accounts: impl IntoIterator<Item = (&'a Address, &'a StoreAccount)>,
) -> B256 {
    trie_root(
        accounts
            .into_iter()
            .map(|(address, account)| (*address, alloy_rlp::encode(TrieAccount::new(account)))),
    )
}

/// Storage root of an account. Zero valued slots are not part of the trie.
pub fn storage_root(storage: &HashMap<U256, U256>) -> B256 {
    trie_root(
        storage
            .iter()
            .filter(|(_, value)| !value.is_zero())
            .map(|(key, value)| (key.to_be_bytes::<32>(), alloy_rlp::encode(value))),
    )
}

#[derive(RlpEncodable)]
struct TrieAccount {
    nonce: u64,
    balance: U256,
    root_hash: B256,
    code_hash: B256,
}

impl TrieAccount {
    fn new(account: &StoreAccount) -> Self {
        Self {
            nonce: account.info.nonce,
            balance: account.info.balance,
            root_hash: storage_root(&account.storage),
            code_hash: account.info.code_hash,
        }
    }
}

fn trie_root<I, A, B>(input: I) -> B256
where
    I: IntoIterator<Item = (A, B)>,
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    sec_trie_root::<KeccakHasher, _, _, _>(input)
}

/// Keccak256 [`Hasher`] for `triehash`.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct KeccakHasher;

impl Hasher for KeccakHasher {
    type Out = B256;
    type StdHasher = PlainHasher;
    const LENGTH: usize = 32;

    #[inline]
    fn hash(x: &[u8]) -> Self::Out {
        keccak256(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revm::primitives::{b256, KECCAK_EMPTY};

    const EMPTY_ROOT: B256 =
        b256!("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421");

    #[test]
    fn empty_state_has_empty_root() {
        let accounts: HashMap<Address, StoreAccount> = HashMap::default();
        assert_eq!(state_merkle_trie_root(&accounts), EMPTY_ROOT);
    }

    #[test]
    fn zero_slots_do_not_change_storage_root() {
        let mut storage = HashMap::default();
        assert_eq!(storage_root(&storage), EMPTY_ROOT);

        storage.insert(U256::from(1), U256::ZERO);
        assert_eq!(storage_root(&storage), EMPTY_ROOT);

        storage.insert(U256::from(2), U256::from(7));
        let with_value = storage_root(&storage);
        assert_ne!(with_value, EMPTY_ROOT);

        storage.insert(U256::from(3), U256::ZERO);
        assert_eq!(storage_root(&storage), with_value);
    }

    #[test]
    fn empty_logs_hash() {
        // keccak256(rlp([]))
        assert_eq!(
            log_rlp_hash(&[]),
            b256!("1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347")
        );
    }

    #[test]
    fn account_root_depends_on_every_field() {
        let base = StoreAccount::default();
        assert_eq!(base.info.code_hash, KECCAK_EMPTY);
        let root = |account: &StoreAccount| {
            state_merkle_trie_root([(&Address::ZERO, account)])
        };
        let base_root = root(&base);

        let mut nonce = base.clone();
        nonce.info.nonce = 1;
        let mut balance = base.clone();
        balance.info.balance = U256::from(1);
        let mut storage = base.clone();
        storage.storage.insert(U256::ZERO, U256::from(1));

        assert_ne!(root(&nonce), base_root);
        assert_ne!(root(&balance), base_root);
        assert_ne!(root(&storage), base_root);
        assert_ne!(root(&nonce), root(&balance));
    }
}
