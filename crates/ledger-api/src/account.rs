//! Accounts and the index they are resolved from.

use std::collections::HashMap;

use ledger_primitives::ec::{PrivateKey, PublicKey};
use ledger_primitives::{EncryptedData, PrimitivesError, SecretPhrase};

/// A ledger account.
///
/// The public key is unknown until the account has sent its first
/// transaction; until then nothing can be encrypted to or decrypted from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: u64,
    pub public_key: Option<PublicKey>,
}

impl Account {
    /// An account whose id has been seen but whose key is not yet known.
    pub fn new(id: u64) -> Self {
        Account {
            id,
            public_key: None,
        }
    }

    /// The account owned by `public_key`.
    pub fn from_public_key(public_key: PublicKey) -> Self {
        Account {
            id: public_key.account_id(),
            public_key: Some(public_key),
        }
    }

    /// Decrypt a message this account sent to the holder of `secret_phrase`.
    pub fn decrypt_from(
        &self,
        encrypted: &EncryptedData,
        secret_phrase: &SecretPhrase,
    ) -> Result<Vec<u8>, PrimitivesError> {
        encrypted.decrypt_with_phrase(secret_phrase, self.require_public_key()?)
    }

    /// Encrypt `plaintext` from the holder of `secret_phrase` to this account.
    pub fn encrypt_to(
        &self,
        plaintext: &[u8],
        secret_phrase: &SecretPhrase,
    ) -> Result<EncryptedData, PrimitivesError> {
        let their_key = self.require_public_key()?;
        let my_key = PrivateKey::from_secret_phrase(secret_phrase)?;
        EncryptedData::encrypt(plaintext, &my_key, their_key)
    }

    fn require_public_key(&self) -> Result<&PublicKey, PrimitivesError> {
        self.public_key.as_ref().ok_or_else(|| {
            PrimitivesError::InvalidPublicKey(format!("account {} has no public key", self.id))
        })
    }
}

/// Looks accounts up by id.
pub trait AccountResolver: Send + Sync {
    fn account(&self, id: u64) -> Option<Account>;
}

/// A fixed set of accounts held in memory.
#[derive(Clone, Debug, Default)]
pub struct AccountIndex {
    accounts: HashMap<u64, Account>,
}

impl AccountIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an account.
    pub fn insert(&mut self, account: Account) -> &mut Self {
        self.accounts.insert(account.id, account);
        self
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl FromIterator<Account> for AccountIndex {
    fn from_iter<I: IntoIterator<Item = Account>>(iter: I) -> Self {
        AccountIndex {
            accounts: iter.into_iter().map(|a| (a.id, a)).collect(),
        }
    }
}

impl AccountResolver for AccountIndex {
    fn account(&self, id: u64) -> Option<Account> {
        self.accounts.get(&id).cloned()
    }
}
