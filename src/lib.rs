//! # encrypter-core
//!
//! Encrypt-then-MAC encryption for strings and structured values: AES-256-CBC
//! for confidentiality, HMAC-SHA-256 for integrity, base64 tokens out.
//!
//! The caller provides one or two pre-shared 256-bit keys and gets back opaque
//! text tokens suitable for cookies, URLs or database columns.
//!
//! ## Features
//!
//! | Feature | Description | Default |
//! |:--------|:------------|:-------:|
//! | `serde` | Structured values via MessagePack (`rmp-serde`) | Yes |
//!
//! ## Quick Start
//!
//! ```rust
//! use encrypter_core::Encrypter;
//!
//! let cipher_key = [0x01u8; 32]; // Use secure keys in production!
//! let auth_key = [0x02u8; 32];
//! let encrypter = Encrypter::new(&cipher_key, &auth_key).unwrap();
//!
//! let token = encrypter.encrypt_string("hello").unwrap();
//! assert_eq!(encrypter.decrypt_string(&token).unwrap(), "hello");
//! ```
//!
//! ## Token Format
//!
//! ```text
//! base64( iv(16) || hmac_sha256(iv || ciphertext)(32) || aes_256_cbc_pkcs7(plaintext) )
//! ```
//!
//! ## Security Properties
//!
//! - **AES-256-CBC + PKCS#7**: confidentiality, fresh random IV per token
//! - **HMAC-SHA-256**: integrity over IV and ciphertext (encrypt-then-MAC)
//! - **Constant-time tag check**: verified before any decryption is attempted
//! - **Capability self test**: known-answer vectors checked before keys are accepted
//! - **Memory safety**: `zeroize` on drop for all key material

// Metrics and observability
pub mod metrics;
pub use metrics::OperationMetrics;

// Encrypt-then-MAC core
pub mod encryption;
pub use encryption::{
    Capabilities, EncryptionError, Encrypter, KeyPair, KeyRole, SealedToken, IV_LEN, KEY_LEN,
    MIN_TOKEN_LEN, TAG_LEN,
};

// Structured values (feature-gated)
#[cfg(feature = "serde")]
pub mod serialization;

/// Result type used across the crate
pub type Result<T> = std::result::Result<T, EncryptionError>;
