use serde::Deserialize;
use std::collections::BTreeMap;

use crate::{AccountInfo, Env, Test, TransactionParts};
use revm::{
    primitives::{Address, Bytes},
    state::Bytecode,
};
use store::StateStore;

/// Single test unit struct
#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct TestUnit {
    /// Test info is optional.
    #[serde(default, rename = "_info")]
    pub info: Option<serde_json::Value>,

    /// Block environment.
    pub env: Env,
    /// Accounts present before the transaction.
    pub pre: BTreeMap<Address, AccountInfo>,
    /// Expected results by fork name.
    pub post: BTreeMap<String, Vec<Test>>,
    /// Transaction template.
    pub transaction: TransactionParts,
    /// Expected return data. Carried, not verified.
    #[serde(default)]
    pub out: Option<Bytes>,
}

/// One (fork, post entry) pair of a [`TestUnit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subtest<'a> {
    /// Fork name as written in the fixture.
    pub fork: &'a str,
    /// Position of the entry in the fork's list.
    pub index: usize,
    /// Expected outcome.
    pub test: &'a Test,
}

impl TestUnit {
    /// Every subtest, forks in lexical order and entries in file order.
    pub fn subtests(&self) -> impl Iterator<Item = Subtest<'_>> + '_ {
        self.post.iter().flat_map(|(fork, tests)| {
            tests.iter().enumerate().map(move |(index, test)| Subtest {
                fork: fork.as_str(),
                index,
                test,
            })
        })
    }

    /// Writes the pre-state into `store` and commits it without pruning.
    pub fn load_pre_state<S: StateStore>(&self, store: &mut S) {
        for (address, account) in &self.pre {
            let code = Bytecode::new_raw_checked(account.code.clone())
                .unwrap_or_else(|_| Bytecode::new_legacy(account.code.clone()));
            store.set_code(*address, code);
            store.set_nonce(*address, account.nonce);
            store.set_balance(*address, account.balance);
            for (key, value) in &account.storage {
                store.set_storage(*address, *key, *value);
            }
        }
        store.commit(false);
    }
}
