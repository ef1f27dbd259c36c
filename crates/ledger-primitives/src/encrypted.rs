//! Encrypted message payloads exchanged between two accounts.
//!
//! A payload is `{data, nonce}`. The AES-256 key is
//! `HMAC-SHA256(ECDH(my_key, their_key), nonce)`, and `data` is
//! `IV (12 bytes) || ciphertext || GCM tag (16 bytes)`.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;
use zeroize::Zeroize;

use crate::ec::{PrivateKey, PublicKey};
use crate::hash::sha256_hmac;
use crate::secret::SecretPhrase;
use crate::PrimitivesError;

/// Length of the per-message nonce in bytes.
pub const NONCE_LEN: usize = 32;

/// AES-GCM IV length.
const IV_LEN: usize = 12;

/// AES-GCM authentication tag length.
const TAG_LEN: usize = 16;

/// Ciphertext plus the nonce needed to rebuild its key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedData {
    /// IV, ciphertext and authentication tag.
    pub data: Vec<u8>,
    /// Random per-message nonce mixed into the shared key.
    pub nonce: Vec<u8>,
}

impl EncryptedData {
    /// Wrap raw payload bytes.
    pub fn new(data: Vec<u8>, nonce: Vec<u8>) -> Self {
        EncryptedData { data, nonce }
    }

    /// Encrypt `plaintext` from `my_key` to the holder of `their_key`.
    pub fn encrypt(
        plaintext: &[u8],
        my_key: &PrivateKey,
        their_key: &PublicKey,
    ) -> Result<Self, PrimitivesError> {
        let mut nonce = vec![0u8; NONCE_LEN];
        rand::rngs::OsRng.fill_bytes(&mut nonce);
        let mut iv = [0u8; IV_LEN];
        rand::rngs::OsRng.fill_bytes(&mut iv);

        let mut key = symmetric_key(my_key, their_key, &nonce)?;
        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| PrimitivesError::EncryptionError(e.to_string()));
        key.zeroize();

        let ciphertext = cipher?
            .encrypt(Nonce::from_slice(&iv), plaintext)
            .map_err(|e| PrimitivesError::EncryptionError(e.to_string()))?;

        let mut data = Vec::with_capacity(IV_LEN + ciphertext.len());
        data.extend_from_slice(&iv);
        data.extend_from_slice(&ciphertext);
        Ok(EncryptedData { data, nonce })
    }

    /// Decrypt a payload addressed to `my_key` by the holder of `their_key`.
    ///
    /// Every failure (wrong key, truncated or tampered data, bad nonce) is
    /// reported as `DecryptionError`; no partial plaintext is ever returned.
    pub fn decrypt(
        &self,
        my_key: &PrivateKey,
        their_key: &PublicKey,
    ) -> Result<Vec<u8>, PrimitivesError> {
        if self.nonce.len() != NONCE_LEN {
            return Err(PrimitivesError::DecryptionError(format!(
                "nonce must be {} bytes, got {}",
                NONCE_LEN,
                self.nonce.len()
            )));
        }
        if self.data.len() < IV_LEN + TAG_LEN {
            return Err(PrimitivesError::DecryptionError(
                "message is too short to be a valid encrypted message".to_string(),
            ));
        }

        let (iv, ciphertext) = self.data.split_at(IV_LEN);

        let mut key = symmetric_key(my_key, their_key, &self.nonce)?;
        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| PrimitivesError::DecryptionError(e.to_string()));
        key.zeroize();

        cipher?
            .decrypt(Nonce::from_slice(iv), ciphertext)
            .map_err(|_| PrimitivesError::DecryptionError("authentication failed".to_string()))
    }

    /// Decrypt with the key derived from `secret_phrase`.
    pub fn decrypt_with_phrase(
        &self,
        secret_phrase: &SecretPhrase,
        their_key: &PublicKey,
    ) -> Result<Vec<u8>, PrimitivesError> {
        let my_key = PrivateKey::from_secret_phrase(secret_phrase)?;
        self.decrypt(&my_key, their_key)
    }
}

fn symmetric_key(
    my_key: &PrivateKey,
    their_key: &PublicKey,
    nonce: &[u8],
) -> Result<[u8; 32], PrimitivesError> {
    let mut shared = my_key.derive_shared_secret(their_key)?;
    let key = sha256_hmac(&shared, nonce);
    shared.zeroize();
    Ok(key)
}
