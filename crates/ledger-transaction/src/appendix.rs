//! Message appendix attached to a transaction.
//!
//! On the wire the appendix is `is_text (1 byte) || VarInt length || bytes`.
//! It is present only when bit 0 of the transaction flags is set.

use ledger_primitives::util::{ByteReader, ByteWriter, VarInt};

use crate::constants::MAX_MESSAGE_LENGTH;
use crate::transaction::read_err;
use crate::TransactionError;

/// A plain (unencrypted) message carried by a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Raw payload.
    pub bytes: Vec<u8>,
    /// Whether `bytes` is UTF-8 text rather than arbitrary binary.
    pub is_text: bool,
}

impl Message {
    /// A UTF-8 text message.
    pub fn text(text: &str) -> Self {
        Message {
            bytes: text.as_bytes().to_vec(),
            is_text: true,
        }
    }

    /// A binary message.
    pub fn binary(bytes: Vec<u8>) -> Self {
        Message {
            bytes,
            is_text: false,
        }
    }

    /// Number of bytes this appendix occupies on the wire.
    pub fn size(&self) -> usize {
        1 + VarInt::from(self.bytes.len()).length() + self.bytes.len()
    }

    /// Check the payload against the message length limit.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.bytes.len() > MAX_MESSAGE_LENGTH {
            return Err(TransactionError::NotValid(format!(
                "message length {} exceeds maximum {}",
                self.bytes.len(),
                MAX_MESSAGE_LENGTH
            )));
        }
        if self.is_text && std::str::from_utf8(&self.bytes).is_err() {
            return Err(TransactionError::NotValid(
                "text message is not valid UTF-8".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let is_text = match reader.read_u8().map_err(read_err("message flag"))? {
            0 => false,
            1 => true,
            other => {
                return Err(TransactionError::SerializationError(format!(
                    "invalid message text flag {}",
                    other
                )))
            }
        };
        let len = reader.read_varint().map_err(read_err("message length"))?.value();
        if len > MAX_MESSAGE_LENGTH as u64 {
            return Err(TransactionError::SerializationError(format!(
                "message length {} exceeds maximum {}",
                len, MAX_MESSAGE_LENGTH
            )));
        }
        let bytes = reader
            .read_bytes(len as usize)
            .map_err(read_err("message bytes"))?
            .to_vec();
        Ok(Message { bytes, is_text })
    }

    pub(crate) fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_u8(u8::from(self.is_text));
        writer.write_varint(VarInt::from(self.bytes.len()));
        writer.write_bytes(&self.bytes);
    }
}
