//! # Signature Codec
//!
//! Turns the stored (R, S, V) triple into the compact 65-byte recoverable
//! signature. V carries the recovery id under one of three conventions:
//!
//! | variant                | V                              | recovery id              |
//! |------------------------|--------------------------------|--------------------------|
//! | dynamic-fee            | 0 or 1                         | V                        |
//! | legacy / access-list   | 27 or 28 (pre-EIP-155)         | V - 27                   |
//! | legacy / access-list   | anything else (EIP-155)        | V - (35 + 2 * chain id)  |
//!
//! V is compared over its full 256-bit width and never truncated.

use primitive_types::U256;

use super::entities::{RecoverySignature, SignatureTriple, TxVariant};
use super::errors::VerificationError;

const LEGACY_V_BASE: u64 = 27;
const EIP155_V_OFFSET: u64 = 35;

/// Decode the recovery id carried in V for the given encoding.
pub fn decode_recovery_id(
    v: &U256,
    chain_id: &U256,
    variant: TxVariant,
) -> Result<u8, VerificationError> {
    let invalid = || VerificationError::InvalidRecoveryId { variant, v: *v };

    let recovery_id = match variant {
        TxVariant::DynamicFee => *v,
        TxVariant::Legacy | TxVariant::AccessList => {
            let legacy_base = U256::from(LEGACY_V_BASE);
            if *v == legacy_base || *v == legacy_base + U256::one() {
                *v - legacy_base
            } else {
                let base = chain_id
                    .checked_mul(U256::from(2u64))
                    .and_then(|doubled| doubled.checked_add(U256::from(EIP155_V_OFFSET)))
                    .ok_or_else(invalid)?;
                v.checked_sub(base).ok_or_else(invalid)?
            }
        }
    };

    if recovery_id > U256::one() {
        return Err(invalid());
    }
    Ok(recovery_id.low_u64() as u8)
}

/// Pack (R, S, V) into `R || S || recovery id`.
pub fn pack_signature(
    triple: &SignatureTriple,
    chain_id: &U256,
    variant: TxVariant,
) -> Result<RecoverySignature, VerificationError> {
    let recovery_id = decode_recovery_id(&triple.v, chain_id, variant)?;
    Ok(RecoverySignature::new(&triple.r, &triple.s, recovery_id))
}
