//! secp256k1 public key.
//!
//! Supports compressed SEC1 serialization, signature verification and
//! account identifier derivation.

use std::fmt;

use k256::ecdsa::signature::Verifier;
use k256::ecdsa::VerifyingKey;

use crate::ec::signature::Signature;
use crate::hash::sha256;
use crate::util::id_from_hash;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// A secp256k1 public key for verification and key agreement.
#[derive(Clone, Debug)]
pub struct PublicKey {
    /// The underlying k256 verifying key.
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a PublicKey from SEC1 encoded bytes (compressed or uncompressed).
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the bytes don't represent a valid point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "public key is empty".to_string(),
            ));
        }
        let vk = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey { inner: vk })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Lowercase hex of the compressed encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Account identifier owned by this key: the first eight bytes
    /// (little-endian) of SHA-256 over the compressed encoding.
    pub fn account_id(&self) -> u64 {
        id_from_hash(&sha256(&self.to_compressed()))
    }

    /// Verify a signature over `message` (hashed with SHA-256) using this key.
    pub fn verify(&self, message: &[u8], sig: &Signature) -> bool {
        self.inner.verify(message, sig.as_k256()).is_ok()
    }

    /// Verify a raw 64-byte signature against raw SEC1 key bytes.
    ///
    /// Returns false when either encoding is malformed.
    pub fn verify_bytes(signature: &[u8], message: &[u8], public_key: &[u8]) -> bool {
        match (Self::from_bytes(public_key), Signature::from_bytes(signature)) {
            (Ok(key), Ok(sig)) => key.verify(message, &sig),
            _ => false,
        }
    }

    /// Whether `bytes` is the canonical compressed encoding of a curve point.
    pub fn is_canonical(bytes: &[u8]) -> bool {
        Self::from_bytes(bytes)
            .map(|key| key.to_compressed()[..] == *bytes)
            .unwrap_or(false)
    }

    pub(crate) fn from_k256_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey { inner: *vk }
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
