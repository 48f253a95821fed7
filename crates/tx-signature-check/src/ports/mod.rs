//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that external callers use
//! - **Outbound (Driven)**: Cryptographic collaborators this crate needs

pub mod inbound;
pub mod outbound;
