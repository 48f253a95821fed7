//! # Transaction Signature Check
//!
//! Verifies that an Ethereum-style transaction was signed by its claimed
//! sender. Given the transaction fields and the stored (R, S, V) triple, the
//! checker:
//!
//! 1. classifies the transaction as legacy, EIP-2930 (access list) or
//!    EIP-1559 (dynamic fee) from which fields are populated
//! 2. rebuilds the unsigned payload and its signing digest
//! 3. decodes the recovery id from V (raw 0/1, 27/28, or EIP-155)
//! 4. recovers the signer's public key and derives its address
//! 5. compares that address with the claimed sender
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Classification, payloads, V decoding, no I/O
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound interfaces
//! - **Adapters** (`adapters/`): Keccak/RLP signing digests, `k256` recovery
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//!
//! ## Example
//!
//! ```ignore
//! use tx_signature_check::{check_signature, Transaction};
//!
//! let tx: Transaction = serde_json::from_str(json)?;
//! match check_signature(Some(&tx)) {
//!     Ok(true) => { /* signed by tx.from */ }
//!     Ok(false) => { /* valid signature, different signer */ }
//!     Err(e) => { /* could not be checked */ }
//! }
//! ```
//!
//! ## Security Notes
//!
//! - A mismatched signer is `Ok(false)`, never an error
//! - High S values are accepted unless `VerifierConfig::enforce_low_s` is set

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::{K256Recovery, LondonSigningHasher};
pub use domain::classifier::{classify, classify_and_build};
pub use domain::codec::{decode_recovery_id, pack_signature};
pub use domain::config::{VerifierConfig, VerifierConfigBuilder};
pub use domain::ecdsa::{address_from_pubkey, keccak256};
pub use domain::entities::{
    AccessList, AccessTuple, Address, BatchCheckResult, Bytes, EcdsaPublicKey, Hash,
    RecoverySignature, SignatureComponent, SignatureTriple, StorageKey, Transaction,
    TransactionBuilder, TxVariant,
};
pub use domain::errors::{ConfigError, RecoveryError, VerificationError};
pub use domain::payload::{
    convert_access_list, AccessListItem, AccessListPayload, DynamicFeePayload, LegacyPayload,
    SigningPayload,
};
pub use ports::inbound::SignatureCheckApi;
pub use ports::outbound::{PublicKeyRecovery, SigningHasher};
pub use primitive_types::{H160, H256, U256};
pub use service::SignatureCheckService;

/// Check a transaction's signature with the default configuration and
/// cryptographic adapters.
///
/// See [`SignatureCheckApi::check_signature`].
pub fn check_signature(transaction: Option<&Transaction>) -> Result<bool, VerificationError> {
    SignatureCheckService::default().check_signature(transaction)
}
