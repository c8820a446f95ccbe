//! Token wire layout
//!
//! Format: `[iv(16)][tag(32)][ciphertext(N)]`, base64-encoded (standard
//! alphabet, padded). Slicing is by byte offset.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::core::EncryptionError;
use super::{IV_LEN, MIN_TOKEN_LEN, TAG_LEN};

/// A decoded token, split into its three regions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedToken {
    pub iv: [u8; IV_LEN],
    pub tag: [u8; TAG_LEN],
    pub ciphertext: Vec<u8>,
}

impl SealedToken {
    pub fn new(iv: [u8; IV_LEN], tag: [u8; TAG_LEN], ciphertext: Vec<u8>) -> Self {
        Self {
            iv,
            tag,
            ciphertext,
        }
    }

    /// Total decoded length
    pub fn byte_len(&self) -> usize {
        MIN_TOKEN_LEN + self.ciphertext.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        bytes.extend_from_slice(&self.iv);
        bytes.extend_from_slice(&self.tag);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EncryptionError> {
        if bytes.len() < MIN_TOKEN_LEN {
            return Err(EncryptionError::MalformedToken(format!(
                "expected at least {} bytes, got {}",
                MIN_TOKEN_LEN,
                bytes.len()
            )));
        }

        let (iv, rest) = bytes.split_at(IV_LEN);
        let (tag, ciphertext) = rest.split_at(TAG_LEN);

        let iv: [u8; IV_LEN] = iv
            .try_into()
            .map_err(|_| EncryptionError::MalformedToken("invalid IV".into()))?;
        let tag: [u8; TAG_LEN] = tag
            .try_into()
            .map_err(|_| EncryptionError::MalformedToken("invalid tag".into()))?;

        Ok(Self {
            iv,
            tag,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Encode to the base64 text handed to callers
    pub fn encode(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Decode base64 text; fails with `MalformedToken` on bad encoding or length
    pub fn decode(token: &str) -> Result<Self, EncryptionError> {
        let bytes = STANDARD
            .decode(token)
            .map_err(|e| EncryptionError::MalformedToken(format!("invalid base64: {}", e)))?;
        Self::from_bytes(&bytes)
    }
}
