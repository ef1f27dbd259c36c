//! Cryptographic operations used by the request handlers.
//!
//! Handlers only talk to [`CryptoProvider`], so the primitives behind it can
//! be swapped (or counted in tests) without touching the workflows.

use ledger_primitives::ec::public_key::COMPRESSED_LEN;
use ledger_primitives::ec::signature::SIGNATURE_LEN;
use ledger_primitives::ec::{PrivateKey, PublicKey};
use ledger_primitives::hash::sha256;
use ledger_primitives::{EncryptedData, PrimitivesError, SecretPhrase};

pub trait CryptoProvider: Send + Sync {
    /// Decrypt `data` sent by the holder of `their_key` to the holder of `secret_phrase`.
    fn decrypt(
        &self,
        data: &EncryptedData,
        secret_phrase: &SecretPhrase,
        their_key: &PublicKey,
    ) -> Result<Vec<u8>, PrimitivesError>;

    /// Compressed public key derived from `secret_phrase`.
    fn public_key(
        &self,
        secret_phrase: &SecretPhrase,
    ) -> Result<[u8; COMPRESSED_LEN], PrimitivesError>;

    /// Compact signature over `message` with the key derived from `secret_phrase`.
    fn sign(
        &self,
        message: &[u8],
        secret_phrase: &SecretPhrase,
    ) -> Result<[u8; SIGNATURE_LEN], PrimitivesError>;

    fn verify_signature(&self, signature: &[u8], message: &[u8], public_key: &[u8]) -> bool;

    /// Whether `public_key` is the canonical compressed encoding of a curve point.
    fn verify_public_key(&self, public_key: &[u8]) -> bool;

    fn hash(&self, data: &[u8]) -> [u8; 32];
}

/// [`CryptoProvider`] backed by secp256k1, SHA-256 and AES-256-GCM.
#[derive(Clone, Copy, Debug, Default)]
pub struct Secp256k1Crypto;

impl CryptoProvider for Secp256k1Crypto {
    fn decrypt(
        &self,
        data: &EncryptedData,
        secret_phrase: &SecretPhrase,
        their_key: &PublicKey,
    ) -> Result<Vec<u8>, PrimitivesError> {
        data.decrypt_with_phrase(secret_phrase, their_key)
    }

    fn public_key(
        &self,
        secret_phrase: &SecretPhrase,
    ) -> Result<[u8; COMPRESSED_LEN], PrimitivesError> {
        Ok(PrivateKey::from_secret_phrase(secret_phrase)?
            .pub_key()
            .to_compressed())
    }

    fn sign(
        &self,
        message: &[u8],
        secret_phrase: &SecretPhrase,
    ) -> Result<[u8; SIGNATURE_LEN], PrimitivesError> {
        let key = PrivateKey::from_secret_phrase(secret_phrase)?;
        Ok(key.sign(message)?.to_bytes())
    }

    fn verify_signature(&self, signature: &[u8], message: &[u8], public_key: &[u8]) -> bool {
        PublicKey::verify_bytes(signature, message, public_key)
    }

    fn verify_public_key(&self, public_key: &[u8]) -> bool {
        PublicKey::is_canonical(public_key)
    }

    fn hash(&self, data: &[u8]) -> [u8; 32] {
        sha256(data)
    }
}
