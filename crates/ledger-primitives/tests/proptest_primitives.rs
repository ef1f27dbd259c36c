use proptest::prelude::*;

use ledger_primitives::ec::{PrivateKey, PublicKey};
use ledger_primitives::{EncryptedData, SecretPhrase};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn secret_phrase_key_pair_is_stable(phrase in "[a-z ]{1,40}") {
        let a = PrivateKey::from_secret_phrase(&SecretPhrase::new(phrase.clone())).unwrap();
        let b = PrivateKey::from_secret_phrase(&SecretPhrase::new(phrase)).unwrap();
        let pub_key = PublicKey::from_bytes(&a.pub_key().to_compressed()).unwrap();
        prop_assert_eq!(pub_key, b.pub_key());
    }

    #[test]
    fn ecdsa_sign_verify(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        // Not all 32-byte arrays are valid private keys (must be < curve order, nonzero).
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let sig = pk.sign(&msg).unwrap();
            prop_assert!(pk.pub_key().verify(&msg, &sig));
        }
    }

    #[test]
    fn encrypted_data_only_opens_for_the_pair(msg in prop::collection::vec(any::<u8>(), 0..128)) {
        let sender = PrivateKey::random();
        let recipient = PrivateKey::random();
        let stranger = PrivateKey::random();

        let encrypted = EncryptedData::encrypt(&msg, &sender, &recipient.pub_key()).unwrap();
        prop_assert_eq!(encrypted.decrypt(&recipient, &sender.pub_key()).unwrap(), msg);
        prop_assert!(encrypted.decrypt(&stranger, &sender.pub_key()).is_err());
    }
}
