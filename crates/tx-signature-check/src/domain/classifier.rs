//! # Transaction Classifier
//!
//! Picks the transaction encoding from which fields are populated and builds
//! the matching unsigned payload.
//!
//! Priority order, first match wins:
//! 1. both fee caps present and at least one strictly positive: dynamic-fee
//! 2. non-empty access list: access-list
//! 3. otherwise: legacy
//!
//! Fee caps that are present but both zero do not make a dynamic-fee
//! transaction, even when the access list is populated.

use primitive_types::U256;
use tracing::debug;

use super::entities::{Transaction, TxVariant};
use super::payload::{
    convert_access_list, AccessListPayload, DynamicFeePayload, LegacyPayload, SigningPayload,
};

/// Select the encoding a transaction was signed under.
pub fn classify(tx: &Transaction) -> TxVariant {
    if active_fee_caps(tx).is_some() {
        TxVariant::DynamicFee
    } else if !tx.access_list.is_empty() {
        TxVariant::AccessList
    } else {
        TxVariant::Legacy
    }
}

/// Classify a transaction and build its canonical unsigned payload.
pub fn classify_and_build(tx: &Transaction) -> (TxVariant, SigningPayload) {
    let payload = if let Some((max_priority_fee_per_gas, max_fee_per_gas)) = active_fee_caps(tx) {
        SigningPayload::DynamicFee(DynamicFeePayload {
            chain_id: tx.chain_id,
            nonce: tx.nonce,
            max_priority_fee_per_gas,
            max_fee_per_gas,
            gas_limit: tx.gas_limit,
            to: tx.to,
            value: tx.value,
            data: tx.data.0.clone(),
            access_list: convert_access_list(&tx.access_list),
        })
    } else if !tx.access_list.is_empty() {
        SigningPayload::AccessList(AccessListPayload {
            chain_id: tx.chain_id,
            nonce: tx.nonce,
            gas_price: tx.gas_price.unwrap_or_default(),
            gas_limit: tx.gas_limit,
            to: tx.to,
            value: tx.value,
            data: tx.data.0.clone(),
            access_list: convert_access_list(&tx.access_list),
        })
    } else {
        SigningPayload::Legacy(LegacyPayload {
            nonce: tx.nonce,
            gas_price: tx.gas_price.unwrap_or_default(),
            gas_limit: tx.gas_limit,
            to: tx.to,
            value: tx.value,
            data: tx.data.0.clone(),
        })
    };

    let variant = payload.variant();
    debug!(
        variant = %variant,
        chain_id = %tx.chain_id,
        nonce = tx.nonce,
        "Classified transaction"
    );

    (variant, payload)
}

/// `(max_priority_fee_per_gas, max_fee_per_gas)` when they make the
/// transaction dynamic-fee.
fn active_fee_caps(tx: &Transaction) -> Option<(U256, U256)> {
    match (tx.max_priority_fee_per_gas, tx.max_fee_per_gas) {
        (Some(tip), Some(cap)) if !tip.is_zero() || !cap.is_zero() => Some((tip, cap)),
        _ => None,
    }
}
