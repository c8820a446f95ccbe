//! Encrypt-then-MAC Encryption Module
//!
//! Provides symmetric authenticated encryption using AES-256-CBC with PKCS#7
//! padding for confidentiality and HMAC-SHA-256 over `IV || ciphertext` for
//! integrity, under two independent 256-bit keys.
//!
//! # Features
//! - **AES-256-CBC + HMAC-SHA-256. Not configurable by design.**
//! - Fresh random 16-byte IV per encryption
//! - Tag verified in constant time before any decryption is attempted
//! - Capability self test (known-answer vectors) before key material is accepted
//! - Key material zeroized on drop
//!
//! # Token format
//!
//! ```text
//! base64( iv(16) || hmac_sha256(32) || aes_256_cbc_pkcs7(N) )
//! ```

pub mod capabilities;
pub mod core;
pub mod keys;
pub mod token;

// Re-exports for convenience
pub use capabilities::Capabilities;
pub use core::{EncryptionError, Encrypter};
pub use keys::KeyPair;
pub use token::SealedToken;

/// Byte length of each key (AES-256 and the HMAC key)
pub const KEY_LEN: usize = 32;

/// Byte length of the CBC initialization vector
pub const IV_LEN: usize = 16;

/// Byte length of the HMAC-SHA-256 tag
pub const TAG_LEN: usize = 32;

/// AES block size
pub const BLOCK_LEN: usize = 16;

/// Smallest decoded token accepted: IV plus tag
pub const MIN_TOKEN_LEN: usize = IV_LEN + TAG_LEN;

/// Which of the two keys an error or operation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// Key for AES-256-CBC
    Cipher,
    /// Key for HMAC-SHA-256
    Authentication,
}

impl KeyRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyRole::Cipher => "encryption",
            KeyRole::Authentication => "authentication",
        }
    }
}

impl std::fmt::Display for KeyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
