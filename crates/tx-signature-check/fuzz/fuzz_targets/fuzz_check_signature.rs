//! Fuzz target for the transaction signature check.
//!
//! Arbitrary field combinations must never panic, and the outcome must be
//! deterministic.
//!
//! ## Running
//!
//! ```bash
//! cd crates/tx-signature-check
//! cargo +nightly fuzz run fuzz_check_signature
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use tx_signature_check::{
    check_signature, AccessTuple, Address, Bytes, Transaction, H256, U256,
};

/// Fuzz input structure for a transaction record.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    from: Option<[u8; 20]>,
    chain_id: [u8; 32],
    nonce: u64,
    to: Option<[u8; 20]>,
    value: [u8; 32],
    data: Vec<u8>,
    gas_limit: u64,
    gas_price: Option<[u8; 32]>,
    max_priority_fee_per_gas: Option<[u8; 32]>,
    max_fee_per_gas: Option<[u8; 32]>,
    access_list: Vec<([u8; 20], Vec<[u8; 32]>)>,
    v: Option<[u8; 32]>,
    r: Option<[u8; 32]>,
    s: Option<[u8; 32]>,
}

fn uint(bytes: [u8; 32]) -> U256 {
    U256::from_big_endian(&bytes)
}

fuzz_target!(|input: FuzzInput| {
    let tx = Transaction {
        from: input.from.map(Address::from),
        chain_id: uint(input.chain_id),
        nonce: input.nonce,
        to: input.to.map(Address::from),
        value: uint(input.value),
        data: Bytes(input.data),
        gas_limit: input.gas_limit,
        gas_price: input.gas_price.map(uint),
        max_priority_fee_per_gas: input.max_priority_fee_per_gas.map(uint),
        max_fee_per_gas: input.max_fee_per_gas.map(uint),
        access_list: input
            .access_list
            .into_iter()
            .map(|(address, keys)| AccessTuple {
                address: Address::from(address),
                storage_keys: keys.into_iter().map(H256::from).collect(),
            })
            .collect(),
        v: input.v.map(uint),
        r: input.r.map(uint),
        s: input.s.map(uint),
    };

    // Must never panic, regardless of input
    let first = check_signature(Some(&tx));
    let second = check_signature(Some(&tx));
    assert_eq!(first, second);

    // Missing pieces are always reported as errors
    if tx.v.is_none() || tx.r.is_none() || tx.s.is_none() || tx.from.is_none() {
        assert!(first.is_err());
    }
});
