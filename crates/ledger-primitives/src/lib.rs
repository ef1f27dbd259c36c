//! Ledger node - cryptographic primitives, hashing, and utilities.
//!
//! This crate provides the building blocks used by the transaction and API crates:
//! - SHA-256 and HMAC-SHA256
//! - secp256k1 keys derived from secret phrases, and compact ECDSA signatures
//! - Encrypted message payloads (ECDH + AES-256-GCM)
//! - Little-endian binary reader/writer and VarInt encoding

pub mod hash;
pub mod util;
pub mod ec;
pub mod encrypted;
pub mod secret;

mod error;
pub use error::PrimitivesError;
pub use encrypted::EncryptedData;
pub use secret::SecretPhrase;
