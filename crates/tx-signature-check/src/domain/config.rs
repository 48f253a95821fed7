//! Signature checker configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use tx_signature_check::domain::config::VerifierConfigBuilder;
//!
//! let config = VerifierConfigBuilder::new()
//!     .enforce_low_s(true)
//!     .parallel_batch_threshold(64)
//!     .build()
//!     .expect("Valid config");
//! ```

use super::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Signature checker configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Reject S values above half the curve order (EIP-2) before recovery.
    ///
    /// Off by default: recovery itself accepts either S, and historical
    /// transactions signed before EIP-2 carry high S values.
    pub enforce_low_s: bool,
    /// Batches smaller than this are checked sequentially
    pub parallel_batch_threshold: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            enforce_low_s: false,
            parallel_batch_threshold: 16,
        }
    }
}

impl VerifierConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallel_batch_threshold == 0 {
            return Err(ConfigError::InvalidBatchThreshold(
                self.parallel_batch_threshold,
            ));
        }
        Ok(())
    }

    /// Builder-style method to toggle the low-S rule
    pub fn with_enforce_low_s(mut self, enforce: bool) -> Self {
        self.enforce_low_s = enforce;
        self
    }

    /// Builder-style method to set the parallel batch threshold
    pub fn with_parallel_batch_threshold(mut self, threshold: usize) -> Self {
        self.parallel_batch_threshold = threshold;
        self
    }
}

/// Builder for VerifierConfig with validation
#[derive(Default)]
pub struct VerifierConfigBuilder {
    enforce_low_s: Option<bool>,
    parallel_batch_threshold: Option<usize>,
}

impl VerifierConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enforce_low_s(mut self, enforce: bool) -> Self {
        self.enforce_low_s = Some(enforce);
        self
    }

    pub fn parallel_batch_threshold(mut self, threshold: usize) -> Self {
        self.parallel_batch_threshold = Some(threshold);
        self
    }

    /// Build the VerifierConfig, validating all parameters
    pub fn build(self) -> Result<VerifierConfig, ConfigError> {
        let defaults = VerifierConfig::default();

        let config = VerifierConfig {
            enforce_low_s: self.enforce_low_s.unwrap_or(defaults.enforce_low_s),
            parallel_batch_threshold: self
                .parallel_batch_threshold
                .unwrap_or(defaults.parallel_batch_threshold),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = VerifierConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.enforce_low_s);
    }

    #[test]
    fn test_config_validation_rejects_zero_threshold() {
        let config = VerifierConfig::default().with_parallel_batch_threshold(0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidBatchThreshold(0))
        );
    }

    #[test]
    fn test_builder_uses_defaults() {
        let config = VerifierConfigBuilder::new()
            .enforce_low_s(true)
            .build()
            .expect("Should use defaults for other fields");

        assert!(config.enforce_low_s);
        assert_eq!(
            config.parallel_batch_threshold,
            VerifierConfig::default().parallel_batch_threshold
        );
    }

    #[test]
    fn test_builder_rejects_zero_threshold() {
        let result = VerifierConfigBuilder::new()
            .parallel_batch_threshold(0)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidBatchThreshold(0))));
    }

    #[test]
    fn test_config_deserializes_partial_json() {
        let config: VerifierConfig =
            serde_json::from_str(r#"{ "enforce_low_s": true }"#).unwrap();
        assert!(config.enforce_low_s);
        assert_eq!(config.parallel_batch_threshold, 16);
    }
}
