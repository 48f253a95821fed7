//! # Domain Layer
//!
//! Classification, payload construction and signature decoding, with no I/O
//! dependencies. This is the inner layer of the hexagonal architecture.

pub mod classifier;
pub mod codec;
pub mod config;
pub mod ecdsa;
pub mod entities;
pub mod errors;
pub mod payload;
pub mod verifier;
