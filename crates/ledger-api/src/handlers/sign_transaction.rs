//! `signTransaction`: sign an unsigned transaction with the sender's secret phrase.

use std::sync::Arc;

use tracing::debug;

use ledger_primitives::SecretPhrase;
use ledger_transaction::{Transaction, TransactionError};

use crate::crypto::CryptoProvider;
use crate::error::ParameterError;
use crate::handler::{ApiRequestHandler, ApiTag};
use crate::parameter_parser::{
    self, SECRET_PHRASE, UNSIGNED_TRANSACTION_BYTES, UNSIGNED_TRANSACTION_JSON,
};
use crate::request::ApiRequest;
use crate::response::{ApiResponse, SignTransactionResponse};

pub const REQUEST_TYPE: &str = "signTransaction";

/// Validate and sign `transaction` in place.
///
/// Checks run in order: protocol validation, already signed, secret phrase
/// owning the declared sender key. The signing primitive is invoked only
/// once all three pass. Every rejection uses error code 4; a rejected
/// transaction is left unmodified.
pub fn sign_transaction(
    crypto: &dyn CryptoProvider,
    transaction: &mut Transaction,
    secret_phrase: &SecretPhrase,
) -> ApiResponse {
    match try_sign(crypto, transaction, secret_phrase) {
        Ok(response) => response,
        Err(e) => {
            debug!(error = %e, "unsigned transaction rejected");
            ApiResponse::incorrect_unsigned_transaction(&e)
        }
    }
}

fn try_sign(
    crypto: &dyn CryptoProvider,
    transaction: &mut Transaction,
    secret_phrase: &SecretPhrase,
) -> Result<ApiResponse, TransactionError> {
    transaction.validate()?;
    if transaction.is_signed() {
        return Ok(ApiResponse::already_signed());
    }
    if crypto.public_key(secret_phrase)? != transaction.sender_public_key {
        return Ok(ApiResponse::secret_phrase_mismatch());
    }

    let unsigned_bytes = transaction.unsigned_bytes();
    let signature = crypto.sign(&unsigned_bytes, secret_phrase)?;
    transaction.apply_signature(signature)?;

    let sender_key = &transaction.sender_public_key;
    let verify = crypto.verify_signature(&signature, &unsigned_bytes, sender_key)
        && crypto.verify_public_key(sender_key);

    Ok(ApiResponse::SignTransaction(SignTransactionResponse {
        transaction: transaction.string_id()?,
        full_hash: hex::encode(transaction.full_hash()?),
        transaction_bytes: transaction.to_hex(),
        signature_hash: hex::encode(crypto.hash(&signature)),
        verify,
    }))
}

/// Handler for [`REQUEST_TYPE`].
pub struct SignTransaction {
    crypto: Arc<dyn CryptoProvider>,
}

impl SignTransaction {
    pub fn new(crypto: Arc<dyn CryptoProvider>) -> Self {
        SignTransaction { crypto }
    }
}

impl ApiRequestHandler for SignTransaction {
    fn request_type(&self) -> &'static str {
        REQUEST_TYPE
    }

    fn tags(&self) -> &'static [ApiTag] {
        &[ApiTag::Transactions]
    }

    fn parameters(&self) -> &'static [&'static str] {
        &[UNSIGNED_TRANSACTION_BYTES, UNSIGNED_TRANSACTION_JSON, SECRET_PHRASE]
    }

    fn process_request(&self, req: &ApiRequest) -> Result<ApiResponse, ParameterError> {
        let mut transaction = parameter_parser::parse_transaction(
            req.param(UNSIGNED_TRANSACTION_BYTES),
            req.param(UNSIGNED_TRANSACTION_JSON),
        )?;
        let secret_phrase = match req.raw_param(SECRET_PHRASE) {
            Some(phrase) => SecretPhrase::new(phrase),
            None => return Ok(ApiResponse::missing_secret_phrase()),
        };
        Ok(sign_transaction(
            self.crypto.as_ref(),
            &mut transaction,
            &secret_phrase,
        ))
    }
}
