//! # London Signing Hasher
//!
//! RLP + Keccak-256 signing digests for the three transaction encodings:
//!
//! - legacy: `keccak256(rlp([nonce, gasPrice, gasLimit, to, value, data, chainId, 0, 0]))`
//! - EIP-2930: `keccak256(0x01 || rlp([chainId, nonce, gasPrice, gasLimit, to, value, data, accessList]))`
//! - EIP-1559: `keccak256(0x02 || rlp([chainId, nonce, maxPriorityFeePerGas, maxFeePerGas, gasLimit, to, value, data, accessList]))`
//!
//! Legacy transactions are always hashed with the EIP-155 chain id suffix,
//! whichever V convention their signature uses.

use primitive_types::U256;
use rlp::{Encodable, RlpStream};
use sha3::{Digest, Keccak256};

use crate::domain::entities::{Address, Hash, StorageKey, TxVariant};
use crate::domain::payload::{
    AccessListItem, AccessListPayload, DynamicFeePayload, LegacyPayload, SigningPayload,
};
use crate::ports::outbound::SigningHasher;

/// Default [`SigningHasher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LondonSigningHasher;

impl LondonSigningHasher {
    pub fn new() -> Self {
        Self
    }

    /// RLP preimage of the signing digest, including the type prefix for
    /// typed transactions.
    pub fn signing_preimage(&self, payload: &SigningPayload, chain_id: &U256) -> Vec<u8> {
        match payload {
            SigningPayload::Legacy(p) => encode_legacy(p, chain_id),
            SigningPayload::AccessList(p) => {
                typed(TxVariant::AccessList, encode_access_list_tx(p))
            }
            SigningPayload::DynamicFee(p) => {
                typed(TxVariant::DynamicFee, encode_dynamic_fee_tx(p))
            }
        }
    }
}

impl SigningHasher for LondonSigningHasher {
    fn signing_digest(&self, payload: &SigningPayload, chain_id: &U256) -> Hash {
        let mut hasher = Keccak256::new();
        hasher.update(self.signing_preimage(payload, chain_id));
        hasher.finalize().into()
    }
}

impl Encodable for AccessListItem {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(2);
        s.append(&self.address);
        s.append_list::<StorageKey, _>(&self.storage_keys);
    }
}

fn encode_legacy(p: &LegacyPayload, chain_id: &U256) -> Vec<u8> {
    let mut stream = RlpStream::new_list(9);
    stream.append(&p.nonce);
    stream.append(&p.gas_price);
    stream.append(&p.gas_limit);
    append_recipient(&mut stream, p.to.as_ref());
    stream.append(&p.value);
    stream.append(&p.data);
    stream.append(chain_id);
    stream.append(&0u8);
    stream.append(&0u8);
    stream.out().to_vec()
}

fn encode_access_list_tx(p: &AccessListPayload) -> Vec<u8> {
    let mut stream = RlpStream::new_list(8);
    stream.append(&p.chain_id);
    stream.append(&p.nonce);
    stream.append(&p.gas_price);
    stream.append(&p.gas_limit);
    append_recipient(&mut stream, p.to.as_ref());
    stream.append(&p.value);
    stream.append(&p.data);
    stream.append_list::<AccessListItem, _>(&p.access_list);
    stream.out().to_vec()
}

fn encode_dynamic_fee_tx(p: &DynamicFeePayload) -> Vec<u8> {
    let mut stream = RlpStream::new_list(9);
    stream.append(&p.chain_id);
    stream.append(&p.nonce);
    stream.append(&p.max_priority_fee_per_gas);
    stream.append(&p.max_fee_per_gas);
    stream.append(&p.gas_limit);
    append_recipient(&mut stream, p.to.as_ref());
    stream.append(&p.value);
    stream.append(&p.data);
    stream.append_list::<AccessListItem, _>(&p.access_list);
    stream.out().to_vec()
}

// Contract creation encodes the recipient as the empty string.
fn append_recipient(stream: &mut RlpStream, to: Option<&Address>) {
    match to {
        Some(to) => {
            stream.append(to);
        }
        None => {
            stream.append_empty_data();
        }
    }
}

fn typed(variant: TxVariant, rlp: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(rlp.len() + 1);
    out.push(variant.type_byte());
    out.extend_from_slice(&rlp);
    out
}
