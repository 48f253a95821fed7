//! # Canonical Signing Payloads
//!
//! One struct per transaction encoding, each holding exactly the fields that
//! encoding signs over. The closed [`SigningPayload`] enum makes a
//! dynamic-fee payload without its fee caps, or a legacy payload with an
//! access list, unrepresentable.

use primitive_types::U256;

use super::entities::{AccessList, Address, StorageKey, TxVariant};

/// Access-list entry in the shape the signing payload encodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessListItem {
    pub address: Address,
    pub storage_keys: Vec<StorageKey>,
}

/// Copy a caller-supplied access list into payload form, preserving order.
pub fn convert_access_list(access_list: &AccessList) -> Vec<AccessListItem> {
    access_list
        .iter()
        .map(|tuple| AccessListItem {
            address: tuple.address,
            storage_keys: tuple.storage_keys.clone(),
        })
        .collect()
}

/// Pre-EIP-2718 payload. The chain id is supplied by the hashing convention.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyPayload {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
}

/// EIP-2930 payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessListPayload {
    pub chain_id: U256,
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
    pub access_list: Vec<AccessListItem>,
}

/// EIP-1559 payload. The access list may be empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DynamicFeePayload {
    pub chain_id: U256,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
    pub access_list: Vec<AccessListItem>,
}

/// The unsigned payload a transaction's signature was produced over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SigningPayload {
    Legacy(LegacyPayload),
    AccessList(AccessListPayload),
    DynamicFee(DynamicFeePayload),
}

impl SigningPayload {
    pub fn variant(&self) -> TxVariant {
        match self {
            SigningPayload::Legacy(_) => TxVariant::Legacy,
            SigningPayload::AccessList(_) => TxVariant::AccessList,
            SigningPayload::DynamicFee(_) => TxVariant::DynamicFee,
        }
    }
}
