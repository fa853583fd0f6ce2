//! State roots of published fixture states.
//!
//! Both states come from the `PragueToOsakaAtTime15k` blockchain test
//! `test_transaction_gas_limit_cap_at_transition`: the genesis pre-state and
//! the post-state after its only valid block. The expected hashes are the
//! `stateRoot` fields of the corresponding block headers.

use revm::primitives::{b256, B256};
use rstest::rstest;
use serde_json::{json, Value};
use store::{InMemoryStore, StateStore};
use stvm_statetest_types::TestUnit;

fn unit_with_pre(pre: Value) -> TestUnit {
    serde_json::from_value(json!({
        "env": {
            "currentCoinbase": "0x2adc25665018aa1fe0e6bc666dac8fc2697ff9ba",
            "currentDifficulty": "0x00",
            "currentGasLimit": "0x016345785d8a0000",
            "currentNumber": "0x01",
            "currentTimestamp": "0x03e8"
        },
        "pre": pre,
        "post": {},
        "transaction": {
            "data": ["0x"],
            "gasLimit": ["0x5208"],
            "gasPrice": "0x0a",
            "nonce": "0x00",
            "secretKey": "0x45a915e4d060149eb4365960e6a7a45f334393093061116b197e3240065ff2d8",
            "to": "0x0000000000000000000000000000000000001000",
            "value": ["0x00"]
        }
    }))
    .unwrap()
}

#[rstest]
#[case::genesis(
    include_str!("fixtures/genesis_pre.json"),
    b256!("fe13aa0b3a4ea731b1715a429c1cf100db415262a5bdd49478dc7b9e61cbf1df")
)]
#[case::after_block_1(
    include_str!("fixtures/block_1_post.json"),
    b256!("c1f2dd64894ad795674b904a05d8b1e25e44c1bcab551f891561505cf9d23ec0")
)]
fn matches_published_state_root(#[case] accounts: &str, #[case] expected: B256) {
    let unit = unit_with_pre(serde_json::from_str(accounts).unwrap());
    let mut store = InMemoryStore::new();
    unit.load_pre_state(&mut store);

    assert_eq!(store.intermediate_root(true), expected);
    assert_eq!(store.intermediate_root(false), expected);
}
