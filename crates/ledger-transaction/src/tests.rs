//! Tests for the ledger-transaction crate.
//!
//! Cover wire parsing and serialization, validation limits, signing and
//! the identifiers derived from the signed bytes.

use ledger_primitives::ec::PrivateKey;
use ledger_primitives::hash::sha256;
use ledger_primitives::SecretPhrase;

use crate::appendix::Message;
use crate::constants::{MAX_BALANCE_NQT, MAX_DEADLINE, MIN_FEE_NQT};
use crate::transaction::{Transaction, TransactionType, SIGNATURE_OFFSET};
use crate::TransactionError;

fn sender() -> PrivateKey {
    PrivateKey::from_secret_phrase(&SecretPhrase::new("transaction test sender")).unwrap()
}

fn payment(key: &PrivateKey) -> Transaction {
    let mut tx = Transaction::new(TransactionType::Payment, &key.pub_key());
    tx.timestamp = 1_000;
    tx.recipient_id = 0x1122_3344_5566_7788;
    tx.amount_nqt = 5 * MIN_FEE_NQT;
    tx
}

// -----------------------------------------------------------------------
// Serialization
// -----------------------------------------------------------------------

#[test]
fn test_header_layout() {
    let key = sender();
    let tx = payment(&key);
    let bytes = tx.to_bytes();

    assert_eq!(bytes.len(), tx.size());
    assert_eq!(bytes[0], 0, "payment type");
    assert_eq!(bytes[1], 0x10, "version 1, subtype 0");
    assert_eq!(&bytes[2..6], &1_000u32.to_le_bytes());
    assert_eq!(&bytes[6..8], &MAX_DEADLINE.to_le_bytes());
    assert_eq!(&bytes[8..41], &key.pub_key().to_compressed());
    assert_eq!(&bytes[41..49], &0x1122_3344_5566_7788u64.to_le_bytes());
    assert!(bytes[SIGNATURE_OFFSET..SIGNATURE_OFFSET + 64].iter().all(|b| *b == 0));
}

#[test]
fn test_hex_roundtrip_with_message() {
    let key = sender();
    let mut tx = payment(&key);
    tx.message = Some(Message::text("invoice 17"));
    tx.referenced_transaction_full_hash = Some([7u8; 32]);

    let parsed = Transaction::from_hex(&tx.to_hex()).unwrap();
    assert_eq!(parsed, tx);
    assert_eq!(parsed.to_hex(), tx.to_hex());
}

#[test]
fn test_from_bytes_rejects_malformed() {
    let key = sender();
    let bytes = payment(&key).to_bytes();

    let err = Transaction::from_bytes(&bytes[..bytes.len() - 1]).unwrap_err();
    assert!(matches!(err, TransactionError::SerializationError(_)));

    let mut trailing = bytes.clone();
    trailing.push(0);
    let err = Transaction::from_bytes(&trailing).unwrap_err();
    assert!(err.to_string().contains("trailing 1 bytes"), "got: {}", err);

    let mut unknown = bytes.clone();
    unknown[0] = 7;
    assert!(Transaction::from_bytes(&unknown).is_err());

    assert!(Transaction::from_hex("zz").is_err());
    assert!(Transaction::from_bytes(&[]).is_err());
}

#[test]
fn test_unknown_flags_rejected() {
    let key = sender();
    let mut bytes = payment(&key).to_bytes();
    let flags_offset = SIGNATURE_OFFSET + 64;
    bytes[flags_offset] = 0x02;
    let err = Transaction::from_bytes(&bytes).unwrap_err();
    assert!(err.to_string().contains("unknown flags"), "got: {}", err);
}

// -----------------------------------------------------------------------
// Validation
// -----------------------------------------------------------------------

#[test]
fn test_valid_payment_and_message() {
    let key = sender();
    assert!(payment(&key).validate().is_ok());

    let mut msg = Transaction::new(TransactionType::ArbitraryMessage, &key.pub_key());
    msg.message = Some(Message::text("hello"));
    assert!(msg.validate().is_ok());
}

fn assert_invalid(mutate: impl Fn(&mut Transaction), needle: &str) {
    let mut tx = payment(&sender());
    mutate(&mut tx);
    let err = tx.validate().unwrap_err();
    assert!(matches!(err, TransactionError::NotValid(_)));
    assert!(err.reason().contains(needle), "expected {:?} in {:?}", needle, err.reason());
}

#[test]
fn test_validation_limits() {
    assert_invalid(|tx| tx.version = 2, "version");
    assert_invalid(|tx| tx.deadline = 0, "deadline");
    assert_invalid(|tx| tx.deadline = MAX_DEADLINE + 1, "deadline");
    assert_invalid(|tx| tx.fee_nqt = MIN_FEE_NQT - 1, "fee");
    assert_invalid(|tx| tx.amount_nqt = MAX_BALANCE_NQT + 1, "amount");
    assert_invalid(|tx| tx.amount_nqt = MAX_BALANCE_NQT, "exceeds maximum balance");
    assert_invalid(|tx| tx.recipient_id = 0, "recipient");
    assert_invalid(|tx| tx.amount_nqt = 0, "positive");
    assert_invalid(|tx| tx.sender_public_key = [0x05; 33], "sender public key");
    assert_invalid(
        |tx| tx.message = Some(Message::binary(vec![0u8; 1001])),
        "message length",
    );
}

#[test]
fn test_message_transaction_rules() {
    let key = sender();
    let mut tx = Transaction::new(TransactionType::ArbitraryMessage, &key.pub_key());
    assert!(tx.validate().unwrap_err().reason().contains("no message"));

    tx.message = Some(Message::text("x"));
    tx.amount_nqt = 1;
    assert!(tx.validate().unwrap_err().reason().contains("must not transfer"));
}

#[test]
fn test_error_reason_strips_prefix() {
    let err = TransactionError::NotValid("invalid fee 0".to_string());
    assert_eq!(err.to_string(), "not valid: invalid fee 0");
    assert_eq!(err.reason(), "invalid fee 0");
}

// -----------------------------------------------------------------------
// Signing
// -----------------------------------------------------------------------

#[test]
fn test_sign_and_verify() {
    let key = sender();
    let mut tx = payment(&key);
    assert!(!tx.is_signed());
    assert!(!tx.verify_signature());
    assert!(matches!(tx.full_hash(), Err(TransactionError::NotSigned)));

    let unsigned = tx.unsigned_bytes();
    tx.sign(&key).unwrap();

    assert!(tx.is_signed());
    assert!(tx.verify_signature());
    assert!(tx.verify_public_key());
    assert_eq!(tx.unsigned_bytes(), unsigned, "signature slot is zeroed");

    let full_hash = tx.full_hash().unwrap();
    assert_eq!(full_hash, sha256(&tx.to_bytes()));
    let mut id = [0u8; 8];
    id.copy_from_slice(&full_hash[..8]);
    assert_eq!(tx.id().unwrap(), u64::from_le_bytes(id));
    assert_eq!(tx.string_id().unwrap(), u64::from_le_bytes(id).to_string());
}

#[test]
fn test_sign_twice_is_rejected() {
    let key = sender();
    let mut tx = payment(&key);
    tx.sign(&key).unwrap();
    let signed = tx.clone();

    assert!(matches!(tx.sign(&key), Err(TransactionError::AlreadySigned)));
    assert!(matches!(
        tx.apply_signature([1u8; 64]),
        Err(TransactionError::AlreadySigned)
    ));
    assert_eq!(tx, signed, "transaction is unmodified");
}

#[test]
fn test_signature_survives_roundtrip() {
    let key = sender();
    let mut tx = payment(&key);
    tx.sign(&key).unwrap();

    let parsed = Transaction::from_bytes(&tx.to_bytes()).unwrap();
    assert!(parsed.is_signed());
    assert!(parsed.verify_signature());
    assert_eq!(parsed.full_hash().unwrap(), tx.full_hash().unwrap());

    let from_json = Transaction::from_json(&tx.to_json_string().unwrap()).unwrap();
    assert_eq!(from_json, tx);
}

#[test]
fn test_wrong_key_signature_does_not_verify() {
    let key = sender();
    let other = PrivateKey::random();
    let mut tx = payment(&key);
    tx.sign(&other).unwrap();
    assert!(!tx.verify_signature());
    assert!(tx.verify_public_key());
}

#[test]
fn test_tampered_bytes_do_not_verify() {
    let key = sender();
    let mut tx = payment(&key);
    tx.sign(&key).unwrap();
    tx.amount_nqt += 1;
    assert!(!tx.verify_signature());
}

#[test]
fn test_sender_id_matches_account_id() {
    let key = sender();
    let tx = payment(&key);
    assert_eq!(tx.sender_id(), key.pub_key().account_id());
}

#[test]
fn test_invalid_sender_key_fails_verification() {
    let mut tx = Transaction::with_sender_bytes(TransactionType::Payment, [0x05; 33]);
    tx.apply_signature([1u8; 64]).unwrap();
    assert!(!tx.verify_public_key());
    assert!(!tx.verify_signature());
}
