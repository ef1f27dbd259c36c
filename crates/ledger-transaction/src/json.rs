//! JSON representation of a transaction.
//!
//! Field names are camelCase. Binary fields (keys, hashes, signature) are
//! lowercase hex and account or transaction ids are decimal strings, so
//! 64-bit values survive JavaScript clients.

use serde::{Deserialize, Serialize};

use ledger_primitives::ec::public_key::COMPRESSED_LEN;
use ledger_primitives::ec::signature::SIGNATURE_LEN;
use ledger_primitives::util::is_all_zero;

use crate::appendix::Message;
use crate::transaction::{Transaction, TransactionType};
use crate::TransactionError;

/// Serde model of a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionJson {
    #[serde(rename = "type")]
    pub tx_type: u8,
    pub subtype: u8,
    pub version: u8,
    pub timestamp: u32,
    pub deadline: u16,
    pub sender_public_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(rename = "amountNQT")]
    pub amount_nqt: u64,
    #[serde(rename = "feeNQT")]
    pub fee_nqt: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_transaction_full_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentJson>,

    /// Sender account id. Output only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    /// Transaction id, present once signed. Output only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<String>,
    /// Full hash, present once signed. Output only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_hash: Option<String>,
}

/// Message appendix in JSON form. Text messages are carried verbatim,
/// binary ones as hex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentJson {
    pub message: String,
    #[serde(default)]
    pub message_is_text: bool,
}

impl Transaction {
    /// Parse a transaction from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, TransactionError> {
        let parsed: TransactionJson = serde_json::from_str(json)?;
        Transaction::try_from(parsed)
    }

    /// The JSON model of this transaction.
    pub fn to_json(&self) -> TransactionJson {
        TransactionJson::from(self)
    }

    /// The JSON text of this transaction.
    pub fn to_json_string(&self) -> Result<String, TransactionError> {
        Ok(serde_json::to_string(&self.to_json())?)
    }
}

impl From<&Transaction> for TransactionJson {
    fn from(tx: &Transaction) -> Self {
        let (tx_type, subtype) = tx.tx_type.code();
        TransactionJson {
            tx_type,
            subtype,
            version: tx.version,
            timestamp: tx.timestamp,
            deadline: tx.deadline,
            sender_public_key: hex::encode(tx.sender_public_key),
            recipient: (tx.recipient_id != 0).then(|| tx.recipient_id.to_string()),
            amount_nqt: tx.amount_nqt,
            fee_nqt: tx.fee_nqt,
            referenced_transaction_full_hash: tx.referenced_transaction_full_hash.map(hex::encode),
            signature: tx.signature().map(hex::encode),
            attachment: tx.message.as_ref().map(|m| AttachmentJson {
                message: if m.is_text {
                    String::from_utf8_lossy(&m.bytes).into_owned()
                } else {
                    hex::encode(&m.bytes)
                },
                message_is_text: m.is_text,
            }),
            sender: Some(tx.sender_id().to_string()),
            transaction: tx.string_id().ok(),
            full_hash: tx.full_hash().ok().map(hex::encode),
        }
    }
}

impl TryFrom<TransactionJson> for Transaction {
    type Error = TransactionError;

    fn try_from(json: TransactionJson) -> Result<Self, Self::Error> {
        let tx_type = TransactionType::from_code(json.tx_type, json.subtype)?;
        let sender_public_key =
            decode_fixed::<COMPRESSED_LEN>("senderPublicKey", &json.sender_public_key)?;
        let recipient_id = match json.recipient.as_deref().map(str::trim) {
            None | Some("") => 0,
            Some(id) => id.parse::<u64>().map_err(|e| {
                TransactionError::SerializationError(format!("invalid recipient {:?}: {}", id, e))
            })?,
        };
        let referenced = json
            .referenced_transaction_full_hash
            .as_deref()
            .map(|h| decode_fixed::<32>("referencedTransactionFullHash", h))
            .transpose()?
            .filter(|h| !is_all_zero(h));
        let message = match json.attachment {
            None => None,
            Some(a) if a.message_is_text => Some(Message::text(&a.message)),
            Some(a) => Some(Message::binary(hex::decode(a.message.trim()).map_err(|e| {
                TransactionError::SerializationError(format!("invalid message hex: {}", e))
            })?)),
        };

        let mut tx = Transaction::with_sender_bytes(tx_type, sender_public_key);
        tx.version = json.version;
        tx.timestamp = json.timestamp;
        tx.deadline = json.deadline;
        tx.recipient_id = recipient_id;
        tx.amount_nqt = json.amount_nqt;
        tx.fee_nqt = json.fee_nqt;
        tx.referenced_transaction_full_hash = referenced;
        tx.message = message;
        if let Some(sig) = json.signature.as_deref() {
            let sig = decode_fixed::<SIGNATURE_LEN>("signature", sig)?;
            if !is_all_zero(&sig) {
                tx.apply_signature(sig)?;
            }
        }
        Ok(tx)
    }
}

fn decode_fixed<const N: usize>(field: &str, value: &str) -> Result<[u8; N], TransactionError> {
    let bytes = hex::decode(value.trim()).map_err(|e| {
        TransactionError::SerializationError(format!("invalid {} hex: {}", field, e))
    })?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| {
        TransactionError::SerializationError(format!(
            "{} must be {} bytes, got {}",
            field,
            N,
            bytes.len()
        ))
    })
}
