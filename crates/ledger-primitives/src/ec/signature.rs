//! ECDSA signature in fixed 64-byte compact form.
//!
//! The wire representation is `R (32 bytes) || S (32 bytes)`, big-endian.
//! Signatures produced by [`PrivateKey::sign`](crate::ec::PrivateKey::sign)
//! are low-S normalized.

use k256::ecdsa;

use crate::PrimitivesError;

/// Length of a compact signature in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// An ECDSA secp256k1 signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    inner: ecdsa::Signature,
}

impl Signature {
    /// Parse a 64-byte compact signature.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if the length is wrong or
    /// R/S are zero or not below the curve order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(PrimitivesError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            )));
        }
        let inner = ecdsa::Signature::from_slice(bytes)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        Ok(Signature { inner })
    }

    /// Serialize to the 64-byte compact form.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Lowercase hex of the compact form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub(crate) fn from_k256(sig: ecdsa::Signature) -> Self {
        // k256 signs low-S already; normalize anything handed in from elsewhere.
        let inner = sig.normalize_s().unwrap_or(sig);
        Signature { inner }
    }

    pub(crate) fn as_k256(&self) -> &ecdsa::Signature {
        &self.inner
    }
}
