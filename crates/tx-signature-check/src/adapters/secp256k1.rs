//! # secp256k1 Public Key Recovery
//!
//! Default [`PublicKeyRecovery`] backed by the `k256` crate.
//!
//! `k256` only verifies low-S signatures. High-S signatures are normalized
//! (s' = n - s, y parity flipped) before recovery, which recovers the same
//! public key. Whether high S is acceptable at all is decided by the
//! verifier's `enforce_low_s` setting, not here.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

use crate::domain::entities::{EcdsaPublicKey, Hash, RecoverySignature};
use crate::domain::errors::RecoveryError;
use crate::ports::outbound::PublicKeyRecovery;

/// Default [`PublicKeyRecovery`].
#[derive(Debug, Clone, Copy, Default)]
pub struct K256Recovery;

impl K256Recovery {
    pub fn new() -> Self {
        Self
    }
}

impl PublicKeyRecovery for K256Recovery {
    fn recover(
        &self,
        digest: &Hash,
        signature: &RecoverySignature,
    ) -> Result<EcdsaPublicKey, RecoveryError> {
        let recovery_id = RecoveryId::try_from(signature.recovery_id())
            .map_err(|_| RecoveryError::InvalidRecoveryId(signature.recovery_id()))?;

        let sig =
            Signature::from_slice(signature.rs()).map_err(|_| RecoveryError::InvalidSignature)?;

        let (sig, recovery_id) = match sig.normalize_s() {
            Some(normalized) => (
                normalized,
                RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
            ),
            None => (sig, recovery_id),
        };

        let recovered_key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
            .map_err(|_| RecoveryError::PointNotRecoverable)?;

        // Uncompressed: 0x04 || x || y
        let encoded = recovered_key.to_encoded_point(false);
        let mut bytes = [0u8; 65];
        bytes.copy_from_slice(encoded.as_bytes());

        Ok(EcdsaPublicKey { bytes })
    }
}
