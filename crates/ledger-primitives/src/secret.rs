//! Caller-supplied secret phrase.
//!
//! A key pair is derived deterministically from the phrase. The phrase only
//! lives for one request: it is zeroized on drop and never printed.

use std::fmt;

use zeroize::Zeroize;

/// A secret phrase credential.
///
/// `Debug` output is redacted so the phrase cannot leak through logging.
/// The type is intentionally not `Clone`.
pub struct SecretPhrase(String);

impl SecretPhrase {
    /// Wrap a secret phrase.
    pub fn new(phrase: impl Into<String>) -> Self {
        SecretPhrase(phrase.into())
    }

    /// Borrow the raw phrase for key derivation.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `true` if the phrase is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SecretPhrase {
    fn from(phrase: &str) -> Self {
        SecretPhrase::new(phrase)
    }
}

impl From<String> for SecretPhrase {
    fn from(phrase: String) -> Self {
        SecretPhrase(phrase)
    }
}

impl Drop for SecretPhrase {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for SecretPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretPhrase(<redacted>)")
    }
}
