//! # ECDSA Helpers (secp256k1)
//!
//! Keccak hashing, address derivation and scalar checks shared by the
//! codec, the verifier and the default adapters.
//!
//! ## Security Notes
//!
//! - **Constant-Time Operations**: the low-S check and the final address
//!   comparison use the `subtle` crate

use super::entities::{Address, EcdsaPublicKey, Hash};
use primitive_types::U256;
use sha3::{Digest, Keccak256};
use subtle::{Choice, ConstantTimeEq};

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
pub(crate) const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive Ethereum address from public key.
pub fn address_from_pubkey(public_key: &EcdsaPublicKey) -> Address {
    // Keccak256 hash of public key (without 0x04 prefix)
    let hash = keccak256(&public_key.bytes[1..]);

    // Take last 20 bytes as address
    Address::from_slice(&hash[12..])
}

/// Exact 20-byte equality, evaluated in constant time.
pub fn addresses_match(a: &Address, b: &Address) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Check if S value is in lower half of curve order (EIP-2 malleability protection).
///
/// n is odd, so `s <= (n - 1) / 2` is the same bound as EIP-2's `s <= n / 2`.
pub fn is_low_s(s: &U256) -> bool {
    let mut bytes = [0u8; 32];
    s.to_big_endian(&mut bytes);

    // Constant-time comparison: s <= SECP256K1_HALF_ORDER
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for (s_byte, h_byte) in bytes.iter().zip(SECP256K1_HALF_ORDER.iter()) {
        // less = less OR (NOT greater AND s[i] < h[i])
        // greater = greater OR (NOT less AND s[i] > h[i])
        let not_decided = !(less | greater);
        let byte_less = Choice::from((s_byte < h_byte) as u8);
        let byte_greater = Choice::from((s_byte > h_byte) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    (!greater).into()
}

/// A valid scalar in the upper half of the order: `n / 2 < s < n`.
///
/// Out-of-range S is not malleable, it is simply invalid.
pub fn is_high_s(s: &U256) -> bool {
    !is_low_s(s) && *s < U256::from_big_endian(&SECP256K1_ORDER)
}

/// s' = n - s, the other valid S for the same R (recovery id flips).
pub fn invert_s(s: &U256) -> U256 {
    U256::from_big_endian(&SECP256K1_ORDER).overflowing_sub(*s).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty_input() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_is_low_s_boundary() {
        let half = U256::from_big_endian(&SECP256K1_HALF_ORDER);

        assert!(is_low_s(&half));
        assert!(is_low_s(&(half - U256::one())));
        assert!(!is_low_s(&(half + U256::one())));
        assert!(is_low_s(&U256::one()));
    }

    #[test]
    fn test_is_high_s_excludes_out_of_range() {
        let half = U256::from_big_endian(&SECP256K1_HALF_ORDER);
        let n = U256::from_big_endian(&SECP256K1_ORDER);

        assert!(!is_high_s(&half));
        assert!(is_high_s(&(half + U256::one())));
        assert!(is_high_s(&(n - U256::one())));
        assert!(!is_high_s(&n));
        assert!(!is_high_s(&U256::MAX));
    }

    #[test]
    fn test_invert_s_round_trips() {
        let s = U256::from(0x0101_0101u64);
        assert_eq!(invert_s(&invert_s(&s)), s);
        assert!(!is_low_s(&invert_s(&s)));
    }

    #[test]
    fn test_addresses_match_is_exact() {
        let a = Address::repeat_byte(0x42);
        let mut b = a;
        assert!(addresses_match(&a, &b));

        b.0[19] ^= 0x01;
        assert!(!addresses_match(&a, &b));
    }

    #[test]
    fn test_address_from_pubkey_uses_last_20_bytes() {
        let key = EcdsaPublicKey { bytes: [0x04; 65] };
        let hash = keccak256(&[0x04; 64]);
        assert_eq!(address_from_pubkey(&key).as_bytes(), &hash[12..]);
    }
}
