#![no_main]

use arbitrary::Arbitrary;
use encrypter_core::{EncryptionError, Encrypter, KeyPair, KEY_LEN};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct KeyInput {
    cipher_key: Vec<u8>,
    auth_key: Vec<u8>,
    cipher_text: String,
    auth_text: Option<String>,
}

fuzz_target!(|input: KeyInput| {
    // Attack: Fuzz key validation and key parsing with arbitrary material
    // Validates: No panics, exact length enforcement, parsers never accept bad keys

    let KeyInput { cipher_key, auth_key, cipher_text, auth_text } = input;

    // Fuzz property 1: Only exactly-32-byte keys build an encrypter
    match Encrypter::new(&cipher_key, &auth_key) {
        Ok(encrypter) => {
            assert_eq!(cipher_key.len(), KEY_LEN);
            assert_eq!(auth_key.len(), KEY_LEN);

            // Fuzz property 2: Any valid key pair roundtrips
            let token = encrypter.encrypt_bytes(&cipher_key).expect("Encryption should succeed");
            assert_eq!(encrypter.decrypt_bytes(&token).expect("Roundtrip"), cipher_key);
        }
        Err(EncryptionError::InvalidKey { len, .. }) => {
            assert!(len == cipher_key.len() || len == auth_key.len());
            assert!(cipher_key.len() != KEY_LEN || auth_key.len() != KEY_LEN);
        }
        Err(other) => panic!("Unexpected error: {:?}", other),
    }

    // Fuzz property 3: Text parsers either yield 32-byte keys or InvalidKey
    for result in [
        KeyPair::from_hex(&cipher_text, auth_text.as_deref()),
        KeyPair::from_base64(&cipher_text, auth_text.as_deref()),
    ] {
        match result {
            Ok(keys) => {
                Encrypter::from_key_pair(keys).expect("Parsed keys must build an encrypter");
            }
            Err(EncryptionError::InvalidKey { .. }) => {}
            Err(other) => panic!("Unexpected parse error: {:?}", other),
        }
    }
});
