//! # Signature Check Service
//!
//! Application service layer that implements the `SignatureCheckApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`SignatureCheckApi`)
//! - Holds the outbound ports (`SigningHasher`, `PublicKeyRecovery`)
//! - Delegates the pipeline to the domain layer

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::adapters::{K256Recovery, LondonSigningHasher};
use crate::domain::config::VerifierConfig;
use crate::domain::entities::{Address, BatchCheckResult, Transaction};
use crate::domain::errors::{ConfigError, VerificationError};
use crate::domain::verifier;
use crate::ports::inbound::SignatureCheckApi;
use crate::ports::outbound::{PublicKeyRecovery, SigningHasher};

/// Transaction signature check service.
///
/// Stateless apart from its configuration: a single instance can be shared
/// across threads and used for any number of concurrent checks.
#[derive(Debug, Clone)]
pub struct SignatureCheckService<H = LondonSigningHasher, R = K256Recovery>
where
    H: SigningHasher,
    R: PublicKeyRecovery,
{
    hasher: H,
    recovery: R,
    config: VerifierConfig,
}

impl SignatureCheckService {
    /// Create a service over the default Keccak/RLP hasher and `k256` recovery.
    pub fn new(config: VerifierConfig) -> Result<Self, ConfigError> {
        Self::with_ports(LondonSigningHasher, K256Recovery, config)
    }
}

impl Default for SignatureCheckService {
    fn default() -> Self {
        Self {
            hasher: LondonSigningHasher,
            recovery: K256Recovery,
            config: VerifierConfig::default(),
        }
    }
}

impl<H, R> SignatureCheckService<H, R>
where
    H: SigningHasher,
    R: PublicKeyRecovery,
{
    /// Create a service over caller-supplied cryptographic collaborators.
    pub fn with_ports(hasher: H, recovery: R, config: VerifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            hasher,
            recovery,
            config,
        })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    fn check_one(&self, transaction: &Transaction) -> Result<bool, VerificationError> {
        verifier::verify_signature(transaction, &self.hasher, &self.recovery, &self.config)
            .inspect_err(|e| {
                warn!(
                    nonce = transaction.nonce,
                    chain_id = %transaction.chain_id,
                    error = %e,
                    "Transaction signature could not be checked"
                );
            })
    }
}

impl<H, R> SignatureCheckApi for SignatureCheckService<H, R>
where
    H: SigningHasher,
    R: PublicKeyRecovery,
{
    fn check_signature(&self, transaction: Option<&Transaction>) -> Result<bool, VerificationError> {
        let transaction = transaction.ok_or_else(|| {
            warn!("Signature check requested without a transaction");
            VerificationError::NilTransaction
        })?;
        self.check_one(transaction)
    }

    fn verify_transaction(&self, transaction: &Transaction) -> Result<bool, VerificationError> {
        self.check_one(transaction)
    }

    fn recover_sender(&self, transaction: &Transaction) -> Result<Address, VerificationError> {
        verifier::recover_signer(transaction, &self.hasher, &self.recovery, &self.config)
    }

    fn batch_check(&self, transactions: &[Transaction]) -> BatchCheckResult {
        let results: Vec<_> = if transactions.len() < self.config.parallel_batch_threshold {
            transactions.iter().map(|tx| self.check_one(tx)).collect()
        } else {
            transactions.par_iter().map(|tx| self.check_one(tx)).collect()
        };

        let batch = BatchCheckResult::from_results(results);
        debug!(
            total = transactions.len(),
            verified = batch.verified_count,
            mismatched = batch.mismatch_count,
            errors = batch.error_count,
            "Batch signature check complete"
        );
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{EcdsaPublicKey, Hash, RecoverySignature, TxVariant};
    use crate::domain::errors::RecoveryError;
    use crate::domain::payload::SigningPayload;
    use crate::domain::verifier::test_helpers::*;
    use primitive_types::U256;

    fn service() -> SignatureCheckService {
        SignatureCheckService::default()
    }

    fn signed(variant: TxVariant, encoding: VEncoding) -> Transaction {
        let (key, address) = generate_keypair();
        let mut tx = unsigned(variant, 10);
        tx.from = Some(address);
        sign(&mut tx, &key, encoding);
        tx
    }

    #[test]
    fn test_nil_transaction() {
        let service = service();
        assert_eq!(
            service.check_signature(None),
            Err(VerificationError::NilTransaction)
        );
    }

    #[test]
    fn test_check_signature_present_transaction() {
        let service = service();
        let tx = signed(TxVariant::AccessList, VEncoding::Eip155);
        assert_eq!(service.check_signature(Some(&tx)), Ok(true));
        assert_eq!(service.verify_transaction(&tx), Ok(true));
    }

    #[test]
    fn test_new_keeps_config() {
        let config = VerifierConfig::default()
            .with_enforce_low_s(true)
            .with_parallel_batch_threshold(64);

        let service = SignatureCheckService::new(config.clone()).unwrap();

        assert_eq!(service.config(), &config);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = VerifierConfig::default().with_parallel_batch_threshold(0);
        assert!(matches!(
            SignatureCheckService::new(config),
            Err(ConfigError::InvalidBatchThreshold(0))
        ));
    }

    #[test]
    fn test_batch_check_mixed() {
        let service = SignatureCheckService::new(
            VerifierConfig::default().with_parallel_batch_threshold(4),
        )
        .unwrap();

        let mut batch: Vec<_> = (0..9)
            .map(|i| match i % 3 {
                0 => signed(TxVariant::Legacy, VEncoding::Eip155),
                1 => signed(TxVariant::AccessList, VEncoding::PreEip155),
                _ => signed(TxVariant::DynamicFee, VEncoding::Raw),
            })
            .collect();

        batch[4].from = Some(Address::repeat_byte(0x01));
        batch[7].s = None;

        let result = service.batch_check(&batch);

        assert_eq!(result.results.len(), 9);
        assert_eq!(result.verified_count, 7);
        assert_eq!(result.mismatch_count, 1);
        assert_eq!(result.error_count, 1);
        assert!(!result.all_verified);
        assert_eq!(result.results[4], Ok(false));
        assert!(result.results[7].is_err());
    }

    #[test]
    fn test_batch_check_small_batch_sequential() {
        let service = service();
        let batch = vec![signed(TxVariant::DynamicFee, VEncoding::Raw)];

        let result = service.batch_check(&batch);

        assert!(result.all_verified);
        assert_eq!(result.verified_count, 1);
    }

    #[test]
    fn test_batch_check_empty() {
        let result = service().batch_check(&[]);
        assert!(result.all_verified);
        assert!(result.results.is_empty());
    }

    /// Recovery port that always fails.
    struct RejectingRecovery;

    impl PublicKeyRecovery for RejectingRecovery {
        fn recover(
            &self,
            _digest: &Hash,
            _signature: &RecoverySignature,
        ) -> Result<EcdsaPublicKey, RecoveryError> {
            Err(RecoveryError::PointNotRecoverable)
        }
    }

    /// Hasher port that ignores its input.
    struct FixedHasher;

    impl SigningHasher for FixedHasher {
        fn signing_digest(&self, _payload: &SigningPayload, _chain_id: &U256) -> Hash {
            [0x11; 32]
        }
    }

    #[test]
    fn test_recovery_failure_propagates() {
        let service = SignatureCheckService::with_ports(
            LondonSigningHasher,
            RejectingRecovery,
            VerifierConfig::default(),
        )
        .unwrap();
        let tx = signed(TxVariant::Legacy, VEncoding::Eip155);

        assert_eq!(
            service.verify_transaction(&tx),
            Err(VerificationError::RecoveryFailed(
                RecoveryError::PointNotRecoverable
            ))
        );
    }

    #[test]
    fn test_custom_hasher_is_used() {
        let service = SignatureCheckService::with_ports(
            FixedHasher,
            K256Recovery,
            VerifierConfig::default(),
        )
        .unwrap();
        let tx = signed(TxVariant::Legacy, VEncoding::Eip155);

        // Signed over the real digest, checked against a different one.
        assert_eq!(service.verify_transaction(&tx), Ok(false));
    }

    #[test]
    fn test_recover_sender() {
        let (key, address) = generate_keypair();
        let mut tx = unsigned(TxVariant::AccessList, 10);
        sign(&mut tx, &key, VEncoding::Eip155);

        assert_eq!(
            service().recover_sender(&tx),
            Ok(address)
        );
    }
}
