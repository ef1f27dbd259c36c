//! Typed access to request parameters.
//!
//! Every function either returns the parsed value or a [`ParameterError`]
//! holding the fixed response for that failure.

use ledger_primitives::util::parse_hex_or_empty;
use ledger_primitives::{EncryptedData, SecretPhrase};
use ledger_transaction::Transaction;

use crate::account::{Account, AccountResolver};
use crate::error::ParameterError;
use crate::request::ApiRequest;
use crate::response::ApiResponse;

pub const ACCOUNT: &str = "account";
pub const DATA: &str = "data";
pub const NONCE: &str = "nonce";
pub const DECRYPTED_MESSAGE_IS_TEXT: &str = "decryptedMessageIsText";
pub const SECRET_PHRASE: &str = "secretPhrase";
pub const UNSIGNED_TRANSACTION_BYTES: &str = "unsignedTransactionBytes";
pub const UNSIGNED_TRANSACTION_JSON: &str = "unsignedTransactionJSON";

/// Resolve the `account` parameter.
///
/// Missing gives `"account" not specified`, a value that is not an
/// unsigned decimal id gives `Incorrect "account"`, and an id the resolver
/// does not know gives `Unknown account`.
pub fn get_account(
    req: &ApiRequest,
    accounts: &dyn AccountResolver,
) -> Result<Account, ParameterError> {
    let value = req
        .param(ACCOUNT)
        .ok_or_else(ApiResponse::missing_account)?;
    let id = value
        .parse::<u64>()
        .map_err(|_| ApiResponse::incorrect_account())?;
    accounts
        .account(id)
        .ok_or_else(|| ApiResponse::unknown_account().into())
}

/// The `secretPhrase` parameter, untrimmed.
pub fn get_secret_phrase(req: &ApiRequest) -> Result<SecretPhrase, ParameterError> {
    req.raw_param(SECRET_PHRASE)
        .map(SecretPhrase::new)
        .ok_or_else(|| ApiResponse::missing_secret_phrase().into())
}

/// The `data` and `nonce` parameters. Absent or malformed hex yields empty
/// bytes; the decryption itself then fails.
pub fn get_encrypted_data(req: &ApiRequest) -> EncryptedData {
    let data = parse_hex_or_empty(req.param(DATA).unwrap_or_default());
    let nonce = parse_hex_or_empty(req.param(NONCE).unwrap_or_default());
    EncryptedData::new(data, nonce)
}

/// A flag that is `true` unless its untrimmed value is `false` in any
/// letter case.
pub fn get_flag_default_true(req: &ApiRequest, name: &str) -> bool {
    !req.raw_param(name)
        .map(|v| v.eq_ignore_ascii_case("false"))
        .unwrap_or(false)
}

/// Parse a transaction from hex bytes or JSON text. Bytes win when both
/// are supplied.
pub fn parse_transaction(
    transaction_bytes: Option<&str>,
    transaction_json: Option<&str>,
) -> Result<Transaction, ParameterError> {
    match (transaction_bytes, transaction_json) {
        (Some(bytes), _) => Transaction::from_hex(bytes)
            .map_err(|e| ApiResponse::incorrect_transaction_bytes(&e).into()),
        (None, Some(json)) => Transaction::from_json(json)
            .map_err(|e| ApiResponse::incorrect_transaction_json(&e).into()),
        (None, None) => Err(ApiResponse::missing_transaction_bytes_or_json().into()),
    }
}
