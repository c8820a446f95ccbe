#![no_main]

use arbitrary::Arbitrary;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use encrypter_core::{EncryptionError, Encrypter, MIN_TOKEN_LEN};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum TokenInput {
    /// Arbitrary text handed straight to the decoder
    Text(String),
    /// Arbitrary bytes, correctly base64 encoded
    Payload(Vec<u8>),
}

fuzz_target!(|input: TokenInput| {
    // Attack: Forge or corrupt tokens without knowing the keys
    // Validates: No panics, every forgery rejected, malformed input classified as such

    let encrypter = Encrypter::new(&[0x11; 32], &[0x22; 32]).expect("Encrypter should build");

    match input {
        TokenInput::Text(text) => {
            let result = encrypter.decrypt_bytes(&text);

            // Fuzz property 1: Random text never decrypts
            let err = result.expect_err("Arbitrary text must not decrypt");
            assert!(err.is_invalid_token(), "Unexpected error kind: {:?}", err);

            // Fuzz property 2: String decryption agrees
            assert!(encrypter.decrypt_string(&text).is_err());
        }
        TokenInput::Payload(bytes) => {
            let token = STANDARD.encode(&bytes);
            let result = encrypter.decrypt_bytes(&token);

            // Fuzz property 3: Short payloads are malformed, long ones fail the MAC
            if bytes.len() < MIN_TOKEN_LEN {
                assert!(
                    matches!(result, Err(EncryptionError::MalformedToken(_))),
                    "Short payload must be malformed: {:?}",
                    result
                );
            } else {
                assert!(
                    matches!(result, Err(EncryptionError::AuthenticationFailed)),
                    "Forged payload must fail authentication: {:?}",
                    result
                );
            }
        }
    }
});
