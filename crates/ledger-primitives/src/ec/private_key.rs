//! secp256k1 private key.
//!
//! Wraps a k256 signing key and adds secret phrase derivation, message
//! signing and ECDH shared secrets.

use k256::ecdsa::signature::Signer;
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{FieldBytes, ProjectivePoint};
use rand::rngs::OsRng;

use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::hash::sha256;
use crate::secret::SecretPhrase;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// A secp256k1 private key for signing and key agreement.
#[derive(Clone)]
pub struct PrivateKey {
    /// The underlying k256 signing key.
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a new random private key using the OS random number generator.
    pub fn random() -> Self {
        PrivateKey {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Create a private key from a raw 32-byte scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid scalar on secp256k1,
    /// or an error if the scalar is zero or out of range.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let signing_key = SigningKey::from_bytes(FieldBytes::from_slice(bytes))
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner: signing_key })
    }

    /// Derive the private key belonging to a secret phrase.
    ///
    /// The scalar is the SHA-256 digest of the UTF-8 phrase. The same phrase
    /// always yields the same key pair.
    pub fn from_secret_phrase(phrase: &SecretPhrase) -> Result<Self, PrimitivesError> {
        let mut digest = sha256(phrase.expose().as_bytes());
        let key = Self::from_bytes(&digest);
        zeroize::Zeroize::zeroize(&mut digest);
        key
    }

    /// Serialize the private key as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes().into()
    }

    /// Derive the corresponding public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_k256_verifying_key(self.inner.verifying_key())
    }

    /// Sign a message. The message is hashed with SHA-256 before signing
    /// (RFC6979 deterministic nonce, low-S).
    pub fn sign(&self, message: &[u8]) -> Result<Signature, PrimitivesError> {
        let sig: k256::ecdsa::Signature = self
            .inner
            .try_sign(message)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        Ok(Signature::from_k256(sig))
    }

    /// Compute the ECDH shared secret with another public key.
    ///
    /// # Returns
    /// The 32-byte x-coordinate of `their_key * self`.
    pub fn derive_shared_secret(&self, their_key: &PublicKey) -> Result<[u8; 32], PrimitivesError> {
        let their_point = ProjectivePoint::from(*their_key.verifying_key().as_affine());
        let shared_point = their_point * *self.inner.as_nonzero_scalar().as_ref();

        let encoded = shared_point.to_affine().to_encoded_point(true);
        let bytes = encoded.as_bytes();
        if bytes.len() != 33 {
            return Err(PrimitivesError::PointNotOnCurve);
        }
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&bytes[1..]);
        Ok(secret)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("pub_key", &self.pub_key().to_hex())
            .finish()
    }
}
