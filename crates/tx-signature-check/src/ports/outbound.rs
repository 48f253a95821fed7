//! # Outbound Ports (Driven Ports / SPI)
//!
//! The cryptographic collaborators the checker relies on. Default
//! implementations live in `adapters/`.

use primitive_types::U256;

use crate::domain::entities::{EcdsaPublicKey, Hash, RecoverySignature};
use crate::domain::errors::RecoveryError;
use crate::domain::payload::SigningPayload;

/// Computes the digest a transaction signature is made over.
///
/// The variant travels inside the payload; the chain id is passed
/// separately because the legacy payload does not carry it.
pub trait SigningHasher: Send + Sync {
    fn signing_digest(&self, payload: &SigningPayload, chain_id: &U256) -> Hash;
}

/// Recovers the signer's public key from a digest and a compact signature.
pub trait PublicKeyRecovery: Send + Sync {
    /// # Errors
    /// * `RecoveryError::InvalidSignature` - R or S out of range
    /// * `RecoveryError::InvalidRecoveryId` - recovery byte not accepted
    /// * `RecoveryError::PointNotRecoverable` - no key recovers
    fn recover(
        &self,
        digest: &Hash,
        signature: &RecoverySignature,
    ) -> Result<EcdsaPublicKey, RecoveryError>;
}
