//! # Signature Verification Pipeline
//!
//! The linear check from transaction record to yes/no:
//!
//! 1. required fields (signature triple, sender)
//! 2. classify and build the unsigned payload
//! 3. signing digest
//! 4. pack (R, S, V) into the compact signature
//! 5. recover the public key
//! 6. derive the address
//! 7. compare with the claimed sender
//!
//! Only steps 1, 4 and 5 can fail. A mismatch at step 7 is `Ok(false)`.

use tracing::debug;

use super::classifier::classify_and_build;
use super::codec::pack_signature;
use super::config::VerifierConfig;
use super::ecdsa::{address_from_pubkey, addresses_match, is_high_s};
use super::entities::{Address, SignatureTriple, Transaction};
use super::errors::VerificationError;
use crate::ports::outbound::{PublicKeyRecovery, SigningHasher};

/// Check that `tx`'s signature recovers to its claimed sender.
pub fn verify_signature<H, R>(
    tx: &Transaction,
    hasher: &H,
    recovery: &R,
    config: &VerifierConfig,
) -> Result<bool, VerificationError>
where
    H: SigningHasher + ?Sized,
    R: PublicKeyRecovery + ?Sized,
{
    let triple = tx.signature_triple()?;
    let claimed = tx.from.ok_or(VerificationError::MissingSender)?;

    let recovered = recover_address(tx, &triple, hasher, recovery, config)?;

    if addresses_match(&recovered, &claimed) {
        debug!(sender = ?claimed, v = %triple.v, "Transaction signature verified");
        Ok(true)
    } else {
        debug!(
            expected = ?claimed,
            recovered = ?recovered,
            "Transaction signature does not match sender"
        );
        Ok(false)
    }
}

/// Recover the address that signed `tx`. The claimed sender is not consulted.
pub fn recover_signer<H, R>(
    tx: &Transaction,
    hasher: &H,
    recovery: &R,
    config: &VerifierConfig,
) -> Result<Address, VerificationError>
where
    H: SigningHasher + ?Sized,
    R: PublicKeyRecovery + ?Sized,
{
    let triple = tx.signature_triple()?;
    recover_address(tx, &triple, hasher, recovery, config)
}

fn recover_address<H, R>(
    tx: &Transaction,
    triple: &SignatureTriple,
    hasher: &H,
    recovery: &R,
    config: &VerifierConfig,
) -> Result<Address, VerificationError>
where
    H: SigningHasher + ?Sized,
    R: PublicKeyRecovery + ?Sized,
{
    let (variant, payload) = classify_and_build(tx);
    let digest = hasher.signing_digest(&payload, &tx.chain_id);

    let signature = pack_signature(triple, &tx.chain_id, variant)?;

    if config.enforce_low_s && is_high_s(&triple.s) {
        return Err(VerificationError::MalleableSignature);
    }

    let public_key = recovery.recover(&digest, &signature)?;
    Ok(address_from_pubkey(&public_key))
}
