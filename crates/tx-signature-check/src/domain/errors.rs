//! # Signature Check Errors
//!
//! Every error here is a request-level failure: the check could not be
//! carried out. A signature that is well formed but belongs to someone other
//! than the claimed sender is not an error; it is `Ok(false)`.

use primitive_types::U256;
use thiserror::Error;

use super::entities::{SignatureComponent, TxVariant};

/// Errors that prevent a transaction signature from being checked.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// No transaction was supplied
    #[error("transaction is nil")]
    NilTransaction,

    /// One of V, R or S is absent
    #[error("signature value {0} missing")]
    MissingSignature(SignatureComponent),

    /// The claimed sender address is absent
    #[error("sender address missing")]
    MissingSender,

    /// V does not decode to a recovery id of 0 or 1 under the variant's convention
    #[error("invalid V {v} for {variant} transaction: recovery id must be 0 or 1")]
    InvalidRecoveryId { variant: TxVariant, v: U256 },

    /// S is in the upper half of the curve order (only with `enforce_low_s`)
    #[error("malleable signature (high S value)")]
    MalleableSignature,

    /// The recovery primitive rejected the digest/signature pair
    #[error("public key recovery failed: {0}")]
    RecoveryFailed(#[from] RecoveryError),
}

/// Failures reported by a [`PublicKeyRecovery`](crate::ports::outbound::PublicKeyRecovery) adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecoveryError {
    /// R or S is zero or not below the curve order
    #[error("invalid signature scalars")]
    InvalidSignature,

    /// Recovery byte outside the range the curve accepts
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// No curve point recovers from this digest and signature
    #[error("no public key recovers from signature")]
    PointNotRecoverable,
}

/// Rejected [`VerifierConfig`](super::config::VerifierConfig) values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("parallel batch threshold must be at least 1, got {0}")]
    InvalidBatchThreshold(usize),
}
