//! Key material for the encrypter
//!
//! A [`KeyPair`] holds the AES-256 cipher key and the HMAC-SHA-256
//! authentication key. Both are exactly 32 bytes, validated once when the pair
//! is built, and wiped from memory on drop.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::core::EncryptionError;
use super::{KeyRole, KEY_LEN};

/// Validate a key and copy it into fixed-size storage.
///
/// Length is measured in raw bytes, never characters.
pub(crate) fn validate_key(key: &[u8], role: KeyRole) -> Result<[u8; KEY_LEN], EncryptionError> {
    <[u8; KEY_LEN]>::try_from(key).map_err(|_| EncryptionError::InvalidKey {
        role,
        len: key.len(),
    })
}

/// Cipher and authentication keys owned by a single encrypter.
///
/// # Security
/// Key material is erased on drop via `ZeroizeOnDrop`. Clone is intentionally
/// not derived to prevent key proliferation in memory.
///
/// ```compile_fail
/// use encrypter_core::KeyPair;
/// let keys = KeyPair::single(&[0u8; 32]).unwrap();
/// let cloned = keys.clone(); // ERROR: Clone not implemented
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    cipher_key: [u8; KEY_LEN],
    auth_key: [u8; KEY_LEN],
    /// Set when the authentication key was defaulted to the cipher key
    #[zeroize(skip)]
    shared: bool,
}

impl KeyPair {
    /// Build a pair from separate cipher and authentication keys
    pub fn new(cipher_key: &[u8], auth_key: &[u8]) -> Result<Self, EncryptionError> {
        Ok(Self {
            cipher_key: validate_key(cipher_key, KeyRole::Cipher)?,
            auth_key: validate_key(auth_key, KeyRole::Authentication)?,
            shared: false,
        })
    }

    /// Build a pair where the authentication key is the cipher key
    pub fn single(key: &[u8]) -> Result<Self, EncryptionError> {
        let cipher_key = validate_key(key, KeyRole::Cipher)?;
        Ok(Self {
            cipher_key,
            auth_key: cipher_key,
            shared: true,
        })
    }

    /// Parse hex-encoded keys (64 hex digits each).
    ///
    /// When `auth_hex` is `None` the cipher key is used for authentication too.
    pub fn from_hex(cipher_hex: &str, auth_hex: Option<&str>) -> Result<Self, EncryptionError> {
        let cipher = decode_with(KeyRole::Cipher, cipher_hex, |s| hex::decode(s.trim()).ok())?;
        match auth_hex {
            Some(auth_hex) => {
                let auth =
                    decode_with(KeyRole::Authentication, auth_hex, |s| hex::decode(s.trim()).ok())?;
                Self::new(&cipher, &auth)
            }
            None => Self::single(&cipher),
        }
    }

    /// Parse standard base64-encoded keys.
    ///
    /// When `auth_b64` is `None` the cipher key is used for authentication too.
    pub fn from_base64(cipher_b64: &str, auth_b64: Option<&str>) -> Result<Self, EncryptionError> {
        let cipher = decode_with(KeyRole::Cipher, cipher_b64, |s| STANDARD.decode(s.trim()).ok())?;
        match auth_b64 {
            Some(auth_b64) => {
                let auth = decode_with(KeyRole::Authentication, auth_b64, |s| {
                    STANDARD.decode(s.trim()).ok()
                })?;
                Self::new(&cipher, &auth)
            }
            None => Self::single(&cipher),
        }
    }

    pub(crate) fn cipher_key(&self) -> &[u8; KEY_LEN] {
        &self.cipher_key
    }

    pub(crate) fn auth_key(&self) -> &[u8; KEY_LEN] {
        &self.auth_key
    }

    /// Whether the authentication key was defaulted to the cipher key
    pub fn is_shared(&self) -> bool {
        self.shared
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("cipher_key", &"<redacted>")
            .field("auth_key", &"<redacted>")
            .field("shared", &self.shared)
            .finish()
    }
}

// Decoded bytes are wiped even when the length check fails.
// Undecodable input is reported as a zero-length key.
fn decode_with<F>(
    role: KeyRole,
    encoded: &str,
    decode: F,
) -> Result<Zeroizing<Vec<u8>>, EncryptionError>
where
    F: FnOnce(&str) -> Option<Vec<u8>>,
{
    decode(encoded)
        .map(Zeroizing::new)
        .ok_or(EncryptionError::InvalidKey { role, len: 0 })
}
