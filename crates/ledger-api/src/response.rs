//! API responses and the fixed error responses shared by all handlers.
//!
//! Errors are reported in the response body as
//! `{"errorCode": n, "errorDescription": "...", "error": "..."?}`.

use serde::Serialize;

use ledger_transaction::TransactionError;

/// Error codes carried in `errorCode`.
pub mod error_code {
    pub const INCORRECT_REQUEST: u32 = 1;
    pub const MISSING_PARAMETER: u32 = 3;
    pub const INCORRECT_PARAMETER: u32 = 4;
    pub const UNKNOWN_OBJECT: u32 = 5;
    pub const DECRYPTION_FAILED: u32 = 8;
    pub const API_DISABLED: u32 = 16;
}

/// Body of a successful `decryptFrom` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptFromResponse {
    /// Plaintext as UTF-8 text, or lowercase hex for binary messages.
    pub decrypted_message: String,
}

/// Body of a successful `signTransaction` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignTransactionResponse {
    /// Decimal transaction id.
    pub transaction: String,
    pub full_hash: String,
    /// Hex of the signed transaction bytes.
    pub transaction_bytes: String,
    /// Hex SHA-256 of the signature.
    pub signature_hash: String,
    pub verify: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_code: u32,
    pub error_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Every outcome of an API call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    DecryptFrom(DecryptFromResponse),
    SignTransaction(SignTransactionResponse),
    Error(ErrorResponse),
}

impl ApiResponse {
    /// An error response without detail.
    pub fn error(error_code: u32, description: impl Into<String>) -> Self {
        ApiResponse::Error(ErrorResponse {
            error_code,
            error_description: description.into(),
            error: None,
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ApiResponse::Error(_))
    }

    pub fn error_code(&self) -> Option<u32> {
        match self {
            ApiResponse::Error(e) => Some(e.error_code),
            _ => None,
        }
    }

    pub fn error_description(&self) -> Option<&str> {
        match self {
            ApiResponse::Error(e) => Some(e.error_description.as_str()),
            _ => None,
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        // Serializing plain strings, integers and booleans cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn to_json_string(&self) -> String {
        self.to_json_value().to_string()
    }

    // -----------------------------------------------------------------
    // Fixed responses
    // -----------------------------------------------------------------

    pub fn incorrect_request() -> Self {
        Self::error(error_code::INCORRECT_REQUEST, "Incorrect request")
    }

    pub fn api_disabled() -> Self {
        Self::error(error_code::API_DISABLED, "This API has been disabled")
    }

    /// `"<param>" not specified`.
    pub fn missing(param: &str) -> Self {
        Self::error(
            error_code::MISSING_PARAMETER,
            format!("\"{}\" not specified", param),
        )
    }

    /// `Incorrect "<param>"`.
    pub fn incorrect(param: &str) -> Self {
        Self::error(error_code::INCORRECT_PARAMETER, format!("Incorrect \"{}\"", param))
    }

    pub fn missing_secret_phrase() -> Self {
        Self::missing("secretPhrase")
    }

    pub fn missing_account() -> Self {
        Self::missing("account")
    }

    pub fn incorrect_account() -> Self {
        Self::incorrect("account")
    }

    pub fn unknown_account() -> Self {
        Self::error(error_code::UNKNOWN_OBJECT, "Unknown account")
    }

    pub fn decryption_failed() -> Self {
        Self::error(error_code::DECRYPTION_FAILED, "Decryption failed")
    }

    pub fn missing_transaction_bytes_or_json() -> Self {
        Self::missing("unsignedTransactionBytes\" or \"unsignedTransactionJSON")
    }

    pub fn incorrect_transaction_bytes(err: &TransactionError) -> Self {
        Self::error(
            error_code::INCORRECT_PARAMETER,
            format!("Incorrect unsigned transaction bytes: {}", err),
        )
    }

    pub fn incorrect_transaction_json(err: &TransactionError) -> Self {
        Self::error(
            error_code::INCORRECT_PARAMETER,
            format!("Incorrect unsigned transaction JSON: {}", err),
        )
    }

    pub fn already_signed() -> Self {
        Self::error(
            error_code::INCORRECT_PARAMETER,
            "Incorrect unsigned transaction - already signed",
        )
    }

    pub fn secret_phrase_mismatch() -> Self {
        Self::error(
            error_code::INCORRECT_PARAMETER,
            "Secret phrase doesn't match transaction sender public key",
        )
    }

    /// Catch-all for validation and signing failures. The description
    /// carries the full error, `error` only its reason.
    pub fn incorrect_unsigned_transaction(err: &TransactionError) -> Self {
        ApiResponse::Error(ErrorResponse {
            error_code: error_code::INCORRECT_PARAMETER,
            error_description: format!("Incorrect unsigned transaction: {}", err),
            error: Some(err.reason()),
        })
    }
}

impl From<ErrorResponse> for ApiResponse {
    fn from(e: ErrorResponse) -> Self {
        ApiResponse::Error(e)
    }
}
