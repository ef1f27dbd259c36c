//! Core transaction type for the ledger.
//!
//! A transaction moves an amount (or carries a message) from the account
//! owning `sender_public_key` to `recipient_id`. It is built or parsed in
//! unsigned form, validated, and signed exactly once. The signed bytes
//! determine the full hash and the numeric id.

use ledger_primitives::ec::public_key::COMPRESSED_LEN;
use ledger_primitives::ec::signature::SIGNATURE_LEN;
use ledger_primitives::ec::{PrivateKey, PublicKey};
use ledger_primitives::hash::sha256;
use ledger_primitives::util::{id_from_hash, is_all_zero, ByteReader, ByteWriter};

use crate::appendix::Message;
use crate::constants::{CURRENT_VERSION, MAX_BALANCE_NQT, MAX_DEADLINE, MIN_FEE_NQT};
use crate::TransactionError;

/// Flags bit marking a message appendix.
const FLAG_MESSAGE: u32 = 0x01;

/// Size of everything before the appendices.
const HEADER_LEN: usize = 1 + 1 + 4 + 2 + COMPRESSED_LEN + 8 + 8 + 8 + 32 + SIGNATURE_LEN + 4;

/// Offset of the signature slot inside the serialized header.
#[cfg(test)]
pub(crate) const SIGNATURE_OFFSET: usize = 1 + 1 + 4 + 2 + COMPRESSED_LEN + 8 + 8 + 8 + 32;

/// The kind of a transaction, encoded on the wire as a `(type, subtype)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Ordinary payment of `amount_nqt` to the recipient.
    Payment,
    /// Zero-amount transaction whose only purpose is its message appendix.
    ArbitraryMessage,
}

impl TransactionType {
    /// The `(type, subtype)` codes of this kind.
    pub fn code(&self) -> (u8, u8) {
        match self {
            TransactionType::Payment => (0, 0),
            TransactionType::ArbitraryMessage => (1, 0),
        }
    }

    /// Map wire codes back to a kind.
    pub fn from_code(tx_type: u8, subtype: u8) -> Result<Self, TransactionError> {
        match (tx_type, subtype) {
            (0, 0) => Ok(TransactionType::Payment),
            (1, 0) => Ok(TransactionType::ArbitraryMessage),
            _ => Err(TransactionError::SerializationError(format!(
                "unknown transaction type {}/{}",
                tx_type, subtype
            ))),
        }
    }
}

/// A ledger transaction.
///
/// # Wire format (little-endian)
///
/// | Field                  | Size                               |
/// |------------------------|------------------------------------|
/// | type                   | 1 byte                             |
/// | version / subtype      | 1 byte (version in the high nibble)|
/// | timestamp              | 4 bytes                            |
/// | deadline               | 2 bytes (minutes)                  |
/// | sender public key      | 33 bytes (compressed)              |
/// | recipient id           | 8 bytes                            |
/// | amount                 | 8 bytes                            |
/// | fee                    | 8 bytes                            |
/// | referenced full hash   | 32 bytes (zero = none)             |
/// | signature              | 64 bytes (zero = unsigned)         |
/// | flags                  | 4 bytes                            |
/// | message appendix       | optional, see [`Message`]          |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Payment or message.
    pub tx_type: TransactionType,

    /// Format version, at most [`CURRENT_VERSION`] for a valid transaction.
    pub version: u8,

    /// Seconds since the ledger epoch.
    pub timestamp: u32,

    /// Minutes after `timestamp` during which the transaction may be included.
    pub deadline: u16,

    /// Declared sender key, kept as raw bytes so that a non-canonical
    /// encoding survives a round trip and can be detected.
    pub sender_public_key: [u8; COMPRESSED_LEN],

    /// Recipient account id, zero when there is none.
    pub recipient_id: u64,

    /// Amount transferred, in base units.
    pub amount_nqt: u64,

    /// Fee paid, in base units.
    pub fee_nqt: u64,

    /// Full hash of a transaction this one depends on.
    pub referenced_transaction_full_hash: Option<[u8; 32]>,

    /// Optional message appendix.
    pub message: Option<Message>,

    signature: Option<[u8; SIGNATURE_LEN]>,
}

impl Transaction {
    /// Create an unsigned transaction of the given kind from `sender`.
    ///
    /// Starts at the current version, the maximum deadline and the minimum
    /// fee, with no recipient, amount or message.
    pub fn new(tx_type: TransactionType, sender: &PublicKey) -> Self {
        Self::with_sender_bytes(tx_type, sender.to_compressed())
    }

    /// Like [`new`](Self::new), but takes the declared sender key as raw
    /// bytes without checking that they encode a point.
    pub fn with_sender_bytes(
        tx_type: TransactionType,
        sender_public_key: [u8; COMPRESSED_LEN],
    ) -> Self {
        Transaction {
            tx_type,
            version: CURRENT_VERSION,
            timestamp: 0,
            deadline: MAX_DEADLINE,
            sender_public_key,
            recipient_id: 0,
            amount_nqt: 0,
            fee_nqt: MIN_FEE_NQT,
            referenced_transaction_full_hash: None,
            message: None,
            signature: None,
        }
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    /// Parse a transaction from a hex-encoded string.
    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str.trim()).map_err(|e| {
            TransactionError::SerializationError(format!("invalid hex: {}", e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Parse a transaction from raw bytes.
    ///
    /// The slice must hold exactly one transaction with no trailing data.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "trailing {} bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    /// Deserialize a transaction from a `ByteReader`.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let type_code = reader.read_u8().map_err(read_err("type"))?;
        let version_subtype = reader.read_u8().map_err(read_err("subtype"))?;
        let version = version_subtype >> 4;
        let tx_type = TransactionType::from_code(type_code, version_subtype & 0x0f)?;

        let timestamp = reader.read_u32_le().map_err(read_err("timestamp"))?;
        let deadline = reader.read_u16_le().map_err(read_err("deadline"))?;
        let sender_public_key = reader
            .read_array::<COMPRESSED_LEN>()
            .map_err(read_err("sender public key"))?;
        let recipient_id = reader.read_u64_le().map_err(read_err("recipient"))?;
        let amount_nqt = reader.read_u64_le().map_err(read_err("amount"))?;
        let fee_nqt = reader.read_u64_le().map_err(read_err("fee"))?;
        let referenced = reader
            .read_array::<32>()
            .map_err(read_err("referenced transaction hash"))?;
        let signature = reader
            .read_array::<SIGNATURE_LEN>()
            .map_err(read_err("signature"))?;
        let flags = reader.read_u32_le().map_err(read_err("flags"))?;

        if flags & !FLAG_MESSAGE != 0 {
            return Err(TransactionError::SerializationError(format!(
                "unknown flags {:#x}",
                flags
            )));
        }
        let message = if flags & FLAG_MESSAGE != 0 {
            Some(Message::read_from(reader)?)
        } else {
            None
        };

        Ok(Transaction {
            tx_type,
            version,
            timestamp,
            deadline,
            sender_public_key,
            recipient_id,
            amount_nqt,
            fee_nqt,
            referenced_transaction_full_hash: non_zero(referenced),
            message,
            signature: non_zero(signature),
        })
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Serialize the transaction, including its signature if present.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.serialize(true)
    }

    /// Hex encoding of [`to_bytes`](Self::to_bytes).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// The bytes covered by the signature: the serialized transaction with
    /// the signature slot zeroed.
    pub fn unsigned_bytes(&self) -> Vec<u8> {
        self.serialize(false)
    }

    /// Serialized size in bytes.
    pub fn size(&self) -> usize {
        HEADER_LEN + self.message.as_ref().map_or(0, Message::size)
    }

    fn serialize(&self, with_signature: bool) -> Vec<u8> {
        let mut w = ByteWriter::with_capacity(self.size());
        let (type_code, subtype) = self.tx_type.code();
        w.write_u8(type_code);
        w.write_u8((self.version << 4) | (subtype & 0x0f));
        w.write_u32_le(self.timestamp);
        w.write_u16_le(self.deadline);
        w.write_bytes(&self.sender_public_key);
        w.write_u64_le(self.recipient_id);
        w.write_u64_le(self.amount_nqt);
        w.write_u64_le(self.fee_nqt);
        w.write_bytes(&self.referenced_transaction_full_hash.unwrap_or([0u8; 32]));
        match (&self.signature, with_signature) {
            (Some(sig), true) => w.write_bytes(sig),
            _ => w.write_bytes(&[0u8; SIGNATURE_LEN]),
        }
        let flags = if self.message.is_some() { FLAG_MESSAGE } else { 0 };
        w.write_u32_le(flags);
        if let Some(message) = &self.message {
            message.write_to(&mut w);
        }
        w.into_bytes()
    }

    // -----------------------------------------------------------------
    // Identity
    // -----------------------------------------------------------------

    /// The signature, if the transaction has been signed.
    pub fn signature(&self) -> Option<&[u8; SIGNATURE_LEN]> {
        self.signature.as_ref()
    }

    /// Whether a signature is present.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// SHA-256 of the signed bytes.
    pub fn full_hash(&self) -> Result<[u8; 32], TransactionError> {
        if !self.is_signed() {
            return Err(TransactionError::NotSigned);
        }
        Ok(sha256(&self.to_bytes()))
    }

    /// Numeric id: the first eight bytes of the full hash, little-endian.
    pub fn id(&self) -> Result<u64, TransactionError> {
        Ok(id_from_hash(&self.full_hash()?))
    }

    /// Decimal form of [`id`](Self::id), as used in API responses.
    pub fn string_id(&self) -> Result<String, TransactionError> {
        Ok(self.id()?.to_string())
    }

    /// Account id of the declared sender.
    pub fn sender_id(&self) -> u64 {
        id_from_hash(&sha256(&self.sender_public_key))
    }

    // -----------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------

    /// Check the transaction against the protocol limits.
    ///
    /// Signature presence is not checked here; signing code decides what an
    /// already signed transaction means.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.version > CURRENT_VERSION {
            return Err(TransactionError::NotValid(format!(
                "unsupported transaction version {}",
                self.version
            )));
        }
        if self.deadline < 1 || self.deadline > MAX_DEADLINE {
            return Err(TransactionError::NotValid(format!(
                "invalid deadline {}",
                self.deadline
            )));
        }
        if self.fee_nqt < MIN_FEE_NQT || self.fee_nqt > MAX_BALANCE_NQT {
            return Err(TransactionError::NotValid(format!(
                "invalid fee {}",
                self.fee_nqt
            )));
        }
        if self.amount_nqt > MAX_BALANCE_NQT {
            return Err(TransactionError::NotValid(format!(
                "invalid amount {}",
                self.amount_nqt
            )));
        }
        match self.amount_nqt.checked_add(self.fee_nqt) {
            Some(total) if total <= MAX_BALANCE_NQT => {}
            _ => {
                return Err(TransactionError::NotValid(format!(
                    "amount {} plus fee {} exceeds maximum balance",
                    self.amount_nqt, self.fee_nqt
                )))
            }
        }

        match self.tx_type {
            TransactionType::Payment => {
                if self.recipient_id == 0 {
                    return Err(TransactionError::NotValid(
                        "payment requires a recipient".to_string(),
                    ));
                }
                if self.amount_nqt == 0 {
                    return Err(TransactionError::NotValid(
                        "payment amount must be positive".to_string(),
                    ));
                }
            }
            TransactionType::ArbitraryMessage => {
                if self.message.is_none() {
                    return Err(TransactionError::NotValid(
                        "message transaction has no message".to_string(),
                    ));
                }
                if self.amount_nqt != 0 {
                    return Err(TransactionError::NotValid(
                        "message transaction must not transfer an amount".to_string(),
                    ));
                }
            }
        }

        if let Some(message) = &self.message {
            message.validate()?;
        }

        PublicKey::from_bytes(&self.sender_public_key).map_err(|e| {
            TransactionError::NotValid(format!("invalid sender public key: {}", e))
        })?;

        Ok(())
    }

    // -----------------------------------------------------------------
    // Signing
    // -----------------------------------------------------------------

    /// Attach a signature computed elsewhere over [`unsigned_bytes`](Self::unsigned_bytes).
    ///
    /// # Returns
    /// `Err(AlreadySigned)` if a signature is already present; the
    /// transaction is left untouched in that case.
    pub fn apply_signature(
        &mut self,
        signature: [u8; SIGNATURE_LEN],
    ) -> Result<(), TransactionError> {
        if self.is_signed() {
            return Err(TransactionError::AlreadySigned);
        }
        if is_all_zero(&signature) {
            return Err(TransactionError::SerializationError(
                "signature must not be all zero".to_string(),
            ));
        }
        self.signature = Some(signature);
        Ok(())
    }

    /// Sign with `key`. A transaction can be signed only once.
    pub fn sign(&mut self, key: &PrivateKey) -> Result<(), TransactionError> {
        if self.is_signed() {
            return Err(TransactionError::AlreadySigned);
        }
        let sig = key.sign(&self.unsigned_bytes())?;
        self.apply_signature(sig.to_bytes())
    }

    /// Whether the signature is valid for the declared sender key.
    pub fn verify_signature(&self) -> bool {
        self.signature.as_ref().map_or(false, |sig| {
            PublicKey::verify_bytes(sig, &self.unsigned_bytes(), &self.sender_public_key)
        })
    }

    /// Whether the declared sender key is a canonical compressed encoding
    /// of a curve point.
    pub fn verify_public_key(&self) -> bool {
        PublicKey::is_canonical(&self.sender_public_key)
    }
}

fn non_zero<const N: usize>(bytes: [u8; N]) -> Option<[u8; N]> {
    if is_all_zero(&bytes) {
        None
    } else {
        Some(bytes)
    }
}

pub(crate) fn read_err(
    what: &'static str,
) -> impl Fn(ledger_primitives::PrimitivesError) -> TransactionError {
    move |e| TransactionError::SerializationError(format!("reading {}: {}", what, e))
}
