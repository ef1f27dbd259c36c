//! `decryptFrom`: decrypt a message an account sent to the caller.

use std::sync::Arc;

use tracing::debug;

use ledger_primitives::{EncryptedData, SecretPhrase};

use crate::account::{Account, AccountResolver};
use crate::crypto::CryptoProvider;
use crate::error::ParameterError;
use crate::handler::{ApiRequestHandler, ApiTag};
use crate::parameter_parser::{
    self, ACCOUNT, DATA, DECRYPTED_MESSAGE_IS_TEXT, NONCE, SECRET_PHRASE,
};
use crate::request::ApiRequest;
use crate::response::{ApiResponse, DecryptFromResponse};

pub const REQUEST_TYPE: &str = "decryptFrom";

/// Decrypt `encrypted`, sent by `account`, with the caller's secret phrase.
///
/// An account without a public key is rejected before any cryptography
/// runs. Every decryption failure yields the same fixed response; the
/// cause is only logged at debug level.
pub fn decrypt_from(
    crypto: &dyn CryptoProvider,
    account: &Account,
    encrypted: &EncryptedData,
    secret_phrase: &SecretPhrase,
    decrypted_message_is_text: bool,
) -> ApiResponse {
    let Some(sender_key) = account.public_key.as_ref() else {
        return ApiResponse::incorrect_account();
    };

    match crypto.decrypt(encrypted, secret_phrase, sender_key) {
        Ok(plaintext) => {
            let decrypted_message = if decrypted_message_is_text {
                String::from_utf8_lossy(&plaintext).into_owned()
            } else {
                hex::encode(&plaintext)
            };
            ApiResponse::DecryptFrom(DecryptFromResponse { decrypted_message })
        }
        Err(e) => {
            debug!(account = account.id, error = %e, "decryption failed");
            ApiResponse::decryption_failed()
        }
    }
}

/// Handler for [`REQUEST_TYPE`].
pub struct DecryptFrom {
    accounts: Arc<dyn AccountResolver>,
    crypto: Arc<dyn CryptoProvider>,
}

impl DecryptFrom {
    pub fn new(accounts: Arc<dyn AccountResolver>, crypto: Arc<dyn CryptoProvider>) -> Self {
        DecryptFrom { accounts, crypto }
    }
}

impl ApiRequestHandler for DecryptFrom {
    fn request_type(&self) -> &'static str {
        REQUEST_TYPE
    }

    fn tags(&self) -> &'static [ApiTag] {
        &[ApiTag::Messages]
    }

    fn parameters(&self) -> &'static [&'static str] {
        &[ACCOUNT, DATA, NONCE, DECRYPTED_MESSAGE_IS_TEXT, SECRET_PHRASE]
    }

    fn process_request(&self, req: &ApiRequest) -> Result<ApiResponse, ParameterError> {
        let account = parameter_parser::get_account(req, self.accounts.as_ref())?;
        if account.public_key.is_none() {
            return Ok(ApiResponse::incorrect_account());
        }
        let secret_phrase = parameter_parser::get_secret_phrase(req)?;
        let encrypted = parameter_parser::get_encrypted_data(req);
        let is_text = parameter_parser::get_flag_default_true(req, DECRYPTED_MESSAGE_IS_TEXT);

        Ok(decrypt_from(
            self.crypto.as_ref(),
            &account,
            &encrypted,
            &secret_phrase,
            is_text,
        ))
    }
}
