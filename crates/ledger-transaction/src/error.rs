/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The transaction breaks a validation rule (fee, deadline, amount...).
    #[error("not valid: {0}")]
    NotValid(String),
    /// `sign` was called on a transaction that already carries a signature.
    #[error("transaction already signed")]
    AlreadySigned,
    /// A signed-only value (full hash, id) was requested before signing.
    #[error("transaction is not signed yet")]
    NotSigned,
    /// An error occurred during binary/hex serialization or deserialization.
    #[error("serialization error: {0}")]
    SerializationError(String),
    /// The JSON form could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// An underlying primitives error (forwarded from `ledger-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] ledger_primitives::PrimitivesError),
}

impl TransactionError {
    /// The bare failure reason, without the variant prefix used by `Display`.
    pub fn reason(&self) -> String {
        match self {
            TransactionError::NotValid(msg) | TransactionError::SerializationError(msg) => {
                msg.clone()
            }
            TransactionError::Json(e) => e.to_string(),
            TransactionError::Primitives(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}
