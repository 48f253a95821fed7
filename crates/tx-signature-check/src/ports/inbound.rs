//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this crate.

use crate::domain::entities::{Address, BatchCheckResult, Transaction};
use crate::domain::errors::VerificationError;

/// Primary transaction signature check API.
///
/// Implementations must be thread-safe (`Send + Sync`); every call is
/// independent of every other.
pub trait SignatureCheckApi: Send + Sync {
    /// Check that the transaction's signature recovers to its claimed sender.
    ///
    /// Returns `Ok(true)` on an exact match and `Ok(false)` when the signature
    /// is well formed but recovers to a different address.
    ///
    /// # Errors
    /// * `VerificationError::NilTransaction` - `transaction` is `None`
    /// * any error from [`verify_transaction`](Self::verify_transaction)
    fn check_signature(&self, transaction: Option<&Transaction>) -> Result<bool, VerificationError>;

    /// Check a transaction that is known to be present.
    ///
    /// # Errors
    /// * `VerificationError::MissingSignature` - V, R or S absent
    /// * `VerificationError::MissingSender` - no claimed sender
    /// * `VerificationError::InvalidRecoveryId` - V malformed for the encoding
    /// * `VerificationError::RecoveryFailed` - no public key recovers
    fn verify_transaction(&self, transaction: &Transaction) -> Result<bool, VerificationError>;

    /// Recover the address that signed the transaction.
    ///
    /// Does not require, or look at, the claimed sender.
    fn recover_sender(&self, transaction: &Transaction) -> Result<Address, VerificationError>;

    /// Check many transactions, results in input order.
    ///
    /// # Performance
    /// Large batches are checked in parallel.
    fn batch_check(&self, transactions: &[Transaction]) -> BatchCheckResult;
}
