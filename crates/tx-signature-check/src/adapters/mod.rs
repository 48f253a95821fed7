//! # Adapters Module
//!
//! Default implementations of the outbound ports.

pub mod london;
pub mod secp256k1;

pub use london::LondonSigningHasher;
pub use secp256k1::K256Recovery;
