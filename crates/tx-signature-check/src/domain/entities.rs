//! # Domain Entities
//!
//! Core data structures for transaction signature checking.
//!
//! Addresses and storage keys are fixed-size `primitive-types` hashes, and
//! every big integer (chain id, value, fees, R/S/V) is a `U256`.

use primitive_types::{H160, H256, U256};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroize;

use super::errors::VerificationError;

/// Ethereum-style address (last 20 bytes of keccak256(pubkey))
pub type Address = H160;

/// Access-list storage slot key
pub type StorageKey = H256;

/// 32-byte Keccak-256 digest
pub type Hash = [u8; 32];

// =============================================================================
// Transaction Record
// =============================================================================

/// Opaque call data with `0x`-prefixed hex serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Bytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(&self.0)))
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(s)
            .map(Bytes)
            .map_err(|_| de::Error::custom("invalid hex bytes"))
    }
}

/// One access-list entry: an address and the storage slots it will touch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTuple {
    pub address: Address,
    #[serde(default)]
    pub storage_keys: Vec<StorageKey>,
}

/// Ordered access list as supplied by the caller.
pub type AccessList = Vec<AccessTuple>;

/// A signed transaction record as handed to the checker.
///
/// The record is read-only to this crate. Fee fields for both fee models may
/// be present; classification decides which one is authoritative.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Claimed sender
    #[serde(default)]
    pub from: Option<Address>,
    pub chain_id: U256,
    pub nonce: u64,
    /// Recipient, `None` for contract creation
    #[serde(default)]
    pub to: Option<Address>,
    #[serde(default)]
    pub value: U256,
    #[serde(default)]
    pub data: Bytes,
    pub gas_limit: u64,
    #[serde(default)]
    pub gas_price: Option<U256>,
    #[serde(default)]
    pub max_priority_fee_per_gas: Option<U256>,
    #[serde(default)]
    pub max_fee_per_gas: Option<U256>,
    #[serde(default)]
    pub access_list: AccessList,
    #[serde(default)]
    pub v: Option<U256>,
    #[serde(default)]
    pub r: Option<U256>,
    #[serde(default)]
    pub s: Option<U256>,
}

impl Transaction {
    /// Start building a transaction record.
    pub fn builder() -> TransactionBuilder {
        TransactionBuilder::default()
    }

    /// Returns the present signature triple, naming the first missing component.
    pub fn signature_triple(&self) -> Result<SignatureTriple, VerificationError> {
        let v = self
            .v
            .ok_or(VerificationError::MissingSignature(SignatureComponent::V))?;
        let r = self
            .r
            .ok_or(VerificationError::MissingSignature(SignatureComponent::R))?;
        let s = self
            .s
            .ok_or(VerificationError::MissingSignature(SignatureComponent::S))?;
        Ok(SignatureTriple { r, s, v })
    }
}

/// Fluent constructor for [`Transaction`].
///
/// Performs no validation: any combination of fields can be built, including
/// records the checker will reject.
#[derive(Clone, Debug, Default)]
pub struct TransactionBuilder {
    tx: Transaction,
}

impl TransactionBuilder {
    pub fn from(mut self, from: Address) -> Self {
        self.tx.from = Some(from);
        self
    }

    pub fn chain_id(mut self, chain_id: impl Into<U256>) -> Self {
        self.tx.chain_id = chain_id.into();
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.tx.nonce = nonce;
        self
    }

    pub fn to(mut self, to: Address) -> Self {
        self.tx.to = Some(to);
        self
    }

    pub fn value(mut self, value: impl Into<U256>) -> Self {
        self.tx.value = value.into();
        self
    }

    pub fn data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.tx.data = Bytes(data.into());
        self
    }

    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.tx.gas_limit = gas_limit;
        self
    }

    pub fn gas_price(mut self, gas_price: impl Into<U256>) -> Self {
        self.tx.gas_price = Some(gas_price.into());
        self
    }

    /// Set both dynamic-fee caps.
    pub fn fee_caps(
        mut self,
        max_priority_fee_per_gas: impl Into<U256>,
        max_fee_per_gas: impl Into<U256>,
    ) -> Self {
        self.tx.max_priority_fee_per_gas = Some(max_priority_fee_per_gas.into());
        self.tx.max_fee_per_gas = Some(max_fee_per_gas.into());
        self
    }

    pub fn access_list(mut self, access_list: AccessList) -> Self {
        self.tx.access_list = access_list;
        self
    }

    /// Set the stored signature triple.
    pub fn signature(
        mut self,
        v: impl Into<U256>,
        r: impl Into<U256>,
        s: impl Into<U256>,
    ) -> Self {
        self.tx.v = Some(v.into());
        self.tx.r = Some(r.into());
        self.tx.s = Some(s.into());
        self
    }

    pub fn build(self) -> Transaction {
        self.tx
    }
}

// =============================================================================
// Derived Types
// =============================================================================

/// Transaction encoding selected by classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TxVariant {
    Legacy,
    /// EIP-2930
    AccessList,
    /// EIP-1559
    DynamicFee,
}

impl TxVariant {
    /// EIP-2718 type byte.
    pub fn type_byte(self) -> u8 {
        match self {
            TxVariant::Legacy => 0x00,
            TxVariant::AccessList => 0x01,
            TxVariant::DynamicFee => 0x02,
        }
    }
}

impl fmt::Display for TxVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxVariant::Legacy => write!(f, "legacy"),
            TxVariant::AccessList => write!(f, "access-list"),
            TxVariant::DynamicFee => write!(f, "dynamic-fee"),
        }
    }
}

/// Signature field names, used to report which one is missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignatureComponent {
    V,
    R,
    S,
}

impl fmt::Display for SignatureComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureComponent::V => write!(f, "V"),
            SignatureComponent::R => write!(f, "R"),
            SignatureComponent::S => write!(f, "S"),
        }
    }
}

/// The stored (R, S, V) values once all three are known to be present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignatureTriple {
    pub r: U256,
    pub s: U256,
    pub v: U256,
}

/// Compact recoverable signature: `R (32) || S (32) || recovery id (1)`.
///
/// The buffer is cleared on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct RecoverySignature {
    bytes: [u8; 65],
}

impl RecoverySignature {
    /// Length of the compact encoding.
    pub const LEN: usize = 65;

    /// Pack R and S right-aligned into their 32-byte fields.
    pub fn new(r: &U256, s: &U256, recovery_id: u8) -> Self {
        let mut bytes = [0u8; 65];
        r.to_big_endian(&mut bytes[..32]);
        s.to_big_endian(&mut bytes[32..64]);
        bytes[64] = recovery_id;
        Self { bytes }
    }

    pub fn r(&self) -> &[u8] {
        &self.bytes[..32]
    }

    pub fn s(&self) -> &[u8] {
        &self.bytes[32..64]
    }

    /// `R || S` without the recovery byte.
    pub fn rs(&self) -> &[u8] {
        &self.bytes[..64]
    }

    pub fn recovery_id(&self) -> u8 {
        self.bytes[64]
    }

    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.bytes
    }
}

impl fmt::Debug for RecoverySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoverySignature")
            .field("r", &hex::encode(self.r()))
            .field("s", &hex::encode(self.s()))
            .field("recovery_id", &self.recovery_id())
            .finish()
    }
}

impl Drop for RecoverySignature {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// ECDSA public key (uncompressed format).
///
/// Format: 0x04 || x (32 bytes) || y (32 bytes) = 65 bytes total
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcdsaPublicKey {
    pub bytes: [u8; 65],
}

// =============================================================================
// Batch Result
// =============================================================================

/// Outcome of checking many transactions, in input order.
#[derive(Clone, Debug)]
pub struct BatchCheckResult {
    /// Individual results for each transaction
    pub results: Vec<Result<bool, VerificationError>>,
    /// Signatures that recovered to the claimed sender
    pub verified_count: usize,
    /// Well-formed signatures that recovered to another address
    pub mismatch_count: usize,
    /// Transactions that could not be checked
    pub error_count: usize,
    /// Whether every transaction verified
    pub all_verified: bool,
}

impl BatchCheckResult {
    /// Create a batch result from individual results.
    pub fn from_results(results: Vec<Result<bool, VerificationError>>) -> Self {
        let verified_count = results.iter().filter(|r| matches!(r, Ok(true))).count();
        let mismatch_count = results.iter().filter(|r| matches!(r, Ok(false))).count();
        let error_count = results.len() - verified_count - mismatch_count;

        Self {
            all_verified: verified_count == results.len(),
            results,
            verified_count,
            mismatch_count,
            error_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovery_signature_right_aligns_short_values() {
        let r = U256::from(0x0102u64);
        let s = U256::from_big_endian(&[0xAB; 31]);
        let sig = RecoverySignature::new(&r, &s, 1);

        assert_eq!(sig.r()[..30], [0u8; 30]);
        assert_eq!(sig.r()[30..], [0x01, 0x02]);
        assert_eq!(sig.s()[0], 0);
        assert_eq!(sig.s()[1..], [0xAB; 31]);
        assert_eq!(sig.recovery_id(), 1);
        assert_eq!(sig.as_bytes().len(), RecoverySignature::LEN);
    }

    #[test]
    fn test_signature_triple_names_missing_component() {
        let tx = Transaction::builder().signature(27u64, 1u64, 1u64).build();
        assert!(tx.signature_triple().is_ok());

        let mut missing_r = tx.clone();
        missing_r.r = None;
        assert_eq!(
            missing_r.signature_triple(),
            Err(VerificationError::MissingSignature(SignatureComponent::R))
        );

        let mut missing_s = tx.clone();
        missing_s.s = None;
        assert_eq!(
            missing_s.signature_triple(),
            Err(VerificationError::MissingSignature(SignatureComponent::S))
        );

        let mut missing_v = tx;
        missing_v.v = None;
        assert_eq!(
            missing_v.signature_triple(),
            Err(VerificationError::MissingSignature(SignatureComponent::V))
        );
    }

    #[test]
    fn test_transaction_deserializes_from_json() {
        let json = r#"{
            "from": "0x9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f",
            "chainId": "0x1",
            "nonce": 9,
            "to": "0x3535353535353535353535353535353535353535",
            "value": "0xde0b6b3a7640000",
            "data": "0x",
            "gasLimit": 21000,
            "gasPrice": "0x4a817c800",
            "accessList": [
                {
                    "address": "0x3535353535353535353535353535353535353535",
                    "storageKeys": ["0x0000000000000000000000000000000000000000000000000000000000000001"]
                }
            ],
            "v": "0x25",
            "r": "0x1",
            "s": "0x2"
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.chain_id, U256::one());
        assert_eq!(tx.nonce, 9);
        assert_eq!(tx.value, U256::from(1_000_000_000_000_000_000u64));
        assert!(tx.data.is_empty());
        assert_eq!(tx.gas_price, Some(U256::from(20_000_000_000u64)));
        assert_eq!(tx.max_fee_per_gas, None);
        assert_eq!(tx.access_list.len(), 1);
        assert_eq!(tx.access_list[0].storage_keys[0], H256::from_low_u64_be(1));
        assert_eq!(tx.v, Some(U256::from(37)));
    }

    #[test]
    fn test_transaction_serializes_camel_case_hex() {
        let tx = Transaction::builder()
            .chain_id(1u64)
            .gas_limit(21_000)
            .data(vec![0xCA, 0xFE])
            .build();

        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["data"], "0xcafe");
        assert_eq!(json["gasLimit"], 21_000);
        assert_eq!(json["chainId"], "0x1");
        assert!(json["maxFeePerGas"].is_null());
    }

    #[test]
    fn test_invalid_hex_data_rejected() {
        let json = r#"{ "chainId": "0x1", "nonce": 0, "gasLimit": 0, "data": "0xzz" }"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn test_batch_result_counts() {
        let result = BatchCheckResult::from_results(vec![
            Ok(true),
            Ok(false),
            Err(VerificationError::MissingSender),
            Ok(true),
        ]);

        assert_eq!(result.verified_count, 2);
        assert_eq!(result.mismatch_count, 1);
        assert_eq!(result.error_count, 1);
        assert!(!result.all_verified);
    }
}
