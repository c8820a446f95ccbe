//! Core encrypt-then-MAC functionality
//!
//! This module provides the fundamental encryption/decryption operations:
//! AES-256-CBC with PKCS#7 padding under the cipher key, and HMAC-SHA-256 over
//! `IV || ciphertext` under the authentication key.
//!
//! # Decryption order
//!
//! The tag is recomputed and compared in constant time **before** the
//! ciphertext is touched. A token whose tag does not verify never reaches the
//! block cipher, so padding errors cannot be used as a decryption oracle.
//!
//! # Concurrency
//!
//! An [`Encrypter`] holds only its immutable key pair. Every call works on
//! call-local buffers with a fresh IV from the system CSPRNG, so a single
//! instance can be shared across threads (`Arc<Encrypter>`) without locking.

use crate::metrics::OperationMetrics;
use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::Sha256;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, trace, warn};

use super::capabilities::Capabilities;
use super::keys::KeyPair;
use super::token::SealedToken;
use super::{KeyRole, IV_LEN, TAG_LEN};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// Errors that can occur during encryption operations
///
/// `AuthenticationFailed` and `DecryptionFailed` render the same message so
/// that a caller echoing the error cannot tell them apart.
#[derive(Error, Debug)]
pub enum EncryptionError {
    #[error("Invalid {role} key length: expected 32 bytes, got {len}")]
    InvalidKey { role: KeyRole, len: usize },

    #[error("Required cryptographic capability unavailable: {0}")]
    MissingCapability(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Invalid token")]
    AuthenticationFailed,

    #[error("Invalid token")]
    DecryptionFailed,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Random number generation failed")]
    RngFailure,
}

impl EncryptionError {
    /// True for every error meaning "this token cannot be recovered".
    ///
    /// Callers that must not reveal why a token was rejected should branch on
    /// this instead of on individual variants.
    pub fn is_invalid_token(&self) -> bool {
        matches!(
            self,
            EncryptionError::MalformedToken(_)
                | EncryptionError::AuthenticationFailed
                | EncryptionError::DecryptionFailed
        )
    }
}

/// Encrypt-then-MAC encrypter bound to one key pair
pub struct Encrypter {
    keys: KeyPair,
    capabilities: Capabilities,
    rng: SystemRandom,
}

impl Encrypter {
    /// Create an encrypter with separate cipher and authentication keys
    ///
    /// # Errors
    /// - [`EncryptionError::MissingCapability`] if the self test of
    ///   AES-256-CBC, HMAC-SHA-256 or the CSPRNG fails (checked before keys)
    /// - [`EncryptionError::InvalidKey`] if either key is not 32 bytes
    pub fn new(cipher_key: &[u8], auth_key: &[u8]) -> Result<Self, EncryptionError> {
        let capabilities = Capabilities::probe()?;
        Self::build(KeyPair::new(cipher_key, auth_key)?, capabilities)
    }

    /// Create an encrypter that uses one key for both cipher and authentication
    pub fn with_single_key(key: &[u8]) -> Result<Self, EncryptionError> {
        let capabilities = Capabilities::probe()?;
        Self::build(KeyPair::single(key)?, capabilities)
    }

    /// Create an encrypter from an already validated key pair
    pub fn from_key_pair(keys: KeyPair) -> Result<Self, EncryptionError> {
        let capabilities = Capabilities::probe()?;
        Self::build(keys, capabilities)
    }

    fn build(keys: KeyPair, capabilities: Capabilities) -> Result<Self, EncryptionError> {
        debug!(
            shared_auth_key = keys.is_shared(),
            hardware_acceleration = capabilities.hardware_acceleration(),
            "encrypter initialised"
        );
        Ok(Self {
            keys,
            capabilities,
            rng: SystemRandom::new(),
        })
    }

    /// Capability set resolved at construction
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Encrypt a string without serialization
    pub fn encrypt_string(&self, value: &str) -> Result<String, EncryptionError> {
        self.encrypt_bytes(value.as_bytes())
    }

    /// Decrypt a token produced by [`Encrypter::encrypt_string`]
    ///
    /// # Errors
    /// Besides the token errors of [`Encrypter::decrypt_bytes`], fails with
    /// [`EncryptionError::DeserializationFailed`] if the plaintext is not UTF-8.
    pub fn decrypt_string(&self, token: &str) -> Result<String, EncryptionError> {
        let plaintext = self.decrypt_bytes(token)?;
        String::from_utf8(plaintext).map_err(|_| {
            EncryptionError::DeserializationFailed("plaintext is not valid UTF-8".into())
        })
    }

    /// Encrypt raw bytes into a base64 token
    ///
    /// # Returns
    /// `base64(iv(16) || tag(32) || ciphertext)`
    pub fn encrypt_bytes(&self, plaintext: &[u8]) -> Result<String, EncryptionError> {
        self.encrypt_bytes_with_metrics(plaintext)
            .map(|(token, _)| token)
    }

    /// Decrypt a base64 token back into raw bytes
    ///
    /// # Errors
    /// - [`EncryptionError::MalformedToken`] on bad base64 or a token under 48 bytes
    /// - [`EncryptionError::AuthenticationFailed`] if the tag does not verify
    /// - [`EncryptionError::DecryptionFailed`] if padding is invalid despite a valid tag
    pub fn decrypt_bytes(&self, token: &str) -> Result<Vec<u8>, EncryptionError> {
        self.decrypt_bytes_with_metrics(token)
            .map(|(plaintext, _)| plaintext)
    }

    /// Same as [`Encrypter::encrypt_bytes`], also returning timings for this call
    pub fn encrypt_bytes_with_metrics(
        &self,
        plaintext: &[u8],
    ) -> Result<(String, OperationMetrics), EncryptionError> {
        let iv = self.generate_iv()?;

        let cipher_start = Instant::now();
        let ciphertext = cbc_encrypt(self.keys.cipher_key(), &iv, plaintext)?;
        let cipher_micros = cipher_start.elapsed().as_micros() as u64;

        let mac_start = Instant::now();
        let tag = compute_tag(self.keys.auth_key(), &iv, &ciphertext)?;
        let mac_micros = mac_start.elapsed().as_micros() as u64;

        let token = SealedToken::new(iv, tag, ciphertext).encode();

        trace!(
            plaintext_len = plaintext.len(),
            token_len = token.len(),
            "encrypted payload"
        );

        let metrics = OperationMetrics::new()
            .with_cipher(cipher_micros, self.capabilities.hardware_acceleration())
            .with_mac(mac_micros)
            .with_sizes(plaintext.len(), token.len());

        Ok((token, metrics))
    }

    /// Same as [`Encrypter::decrypt_bytes`], also returning timings for this call
    pub fn decrypt_bytes_with_metrics(
        &self,
        token: &str,
    ) -> Result<(Vec<u8>, OperationMetrics), EncryptionError> {
        let sealed = SealedToken::decode(token).map_err(|e| {
            debug!(token_len = token.len(), "rejected malformed token");
            e
        })?;

        let mac_start = Instant::now();
        let authentic = verify_tag(
            self.keys.auth_key(),
            &sealed.iv,
            &sealed.ciphertext,
            &sealed.tag,
        )?;
        let mac_micros = mac_start.elapsed().as_micros() as u64;

        if !authentic {
            warn!("token authentication failed");
            return Err(EncryptionError::AuthenticationFailed);
        }

        let cipher_start = Instant::now();
        let plaintext =
            cbc_decrypt(self.keys.cipher_key(), &sealed.iv, &sealed.ciphertext).map_err(|e| {
                warn!("authenticated token failed to decrypt");
                e
            })?;
        let cipher_micros = cipher_start.elapsed().as_micros() as u64;

        trace!(
            plaintext_len = plaintext.len(),
            token_len = token.len(),
            "decrypted payload"
        );

        let metrics = OperationMetrics::new()
            .with_cipher(cipher_micros, self.capabilities.hardware_acceleration())
            .with_mac(mac_micros)
            .with_sizes(plaintext.len(), token.len());

        Ok((plaintext, metrics))
    }

    /// Fresh random IV, never derived from input
    fn generate_iv(&self) -> Result<[u8; IV_LEN], EncryptionError> {
        let mut iv = [0u8; IV_LEN];
        self.rng
            .fill(&mut iv)
            .map_err(|_| EncryptionError::RngFailure)?;
        Ok(iv)
    }
}

impl std::fmt::Debug for Encrypter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encrypter")
            .field("keys", &self.keys)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

// Note: Default is intentionally NOT implemented. An encrypter without
// caller-provided keys has no meaning.

/// AES-256-CBC encryption with PKCS#7 padding
pub(crate) fn cbc_encrypt(
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, EncryptionError> {
    let cipher = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| EncryptionError::EncryptionFailed(format!("AES-256-CBC setup: {}", e)))?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// AES-256-CBC decryption, removing PKCS#7 padding
///
/// Empty input, input that is not a whole number of blocks, and bad padding
/// all fail with [`EncryptionError::DecryptionFailed`].
pub(crate) fn cbc_decrypt(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, EncryptionError> {
    let cipher =
        Aes256CbcDec::new_from_slices(key, iv).map_err(|_| EncryptionError::DecryptionFailed)?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| EncryptionError::DecryptionFailed)
}

/// HMAC-SHA-256 over `iv || ciphertext`
pub(crate) fn compute_tag(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<[u8; TAG_LEN], EncryptionError> {
    let mut mac = keyed_mac(key)?;
    mac.update(iv);
    mac.update(ciphertext);
    Ok(mac.finalize().into_bytes().into())
}

/// Recompute the tag over `iv || ciphertext` and compare it with `tag`.
///
/// The comparison is constant time (`Mac::verify_slice`, backed by `subtle`):
/// its duration does not depend on where, or whether, the tags differ. A
/// `tag` of the wrong length is unequal.
pub(crate) fn verify_tag(
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<bool, EncryptionError> {
    let mut mac = keyed_mac(key)?;
    mac.update(iv);
    mac.update(ciphertext);
    Ok(mac.verify_slice(tag).is_ok())
}

fn keyed_mac(key: &[u8]) -> Result<HmacSha256, EncryptionError> {
    // HMAC accepts keys of any length; this only fails on a broken backend
    <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|_| EncryptionError::MissingCapability("HMAC-SHA-256 key setup failed".into()))
}
