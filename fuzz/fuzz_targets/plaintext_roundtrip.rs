#![no_main]

use arbitrary::Arbitrary;
use encrypter_core::{Encrypter, MIN_TOKEN_LEN};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct RoundtripInput {
    data: Vec<u8>,
    text: String,
    numbers: Vec<i64>,
}

fuzz_target!(|input: RoundtripInput| {
    // Attack: Arbitrary plaintext shapes and lengths around block boundaries
    // Validates: No panics, exact roundtrip, predictable token size

    let encrypter = Encrypter::with_single_key(&[0x5c; 32]).expect("Encrypter should build");

    // Fuzz property 1: Bytes roundtrip exactly
    let (token, metrics) = encrypter
        .encrypt_bytes_with_metrics(&input.data)
        .expect("Encryption should succeed");
    assert_eq!(encrypter.decrypt_bytes(&token).expect("Roundtrip"), input.data);

    // Fuzz property 2: Token size is fully determined by plaintext size
    let padded = (input.data.len() / 16 + 1) * 16;
    assert_eq!(metrics.token_len, (MIN_TOKEN_LEN + padded).div_ceil(3) * 4);
    assert_eq!(metrics.token_len, token.len());

    // Fuzz property 3: Text roundtrips exactly
    let token = encrypter.encrypt_string(&input.text).expect("Encryption should succeed");
    assert_eq!(encrypter.decrypt_string(&token).expect("Roundtrip"), input.text);

    // Fuzz property 4: Structured values roundtrip exactly
    let value = (input.text.as_str(), &input.numbers);
    let token = encrypter.encrypt(&value).expect("Encryption should succeed");
    let restored: (String, Vec<i64>) = encrypter.decrypt(&token).expect("Roundtrip");
    assert_eq!(restored.0, input.text);
    assert_eq!(restored.1, input.numbers);
});
