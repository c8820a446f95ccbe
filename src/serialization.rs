//! Structured value flattening
//!
//! Values are flattened to MessagePack (`rmp-serde`, named struct fields)
//! before encryption and rebuilt after decryption. MessagePack is
//! self-delimiting and round-trips numbers, strings, sequences, maps, nulls,
//! booleans and binary data, so any `Serialize` value decrypts back to an
//! equal `Deserialize` value.

use serde::{de::DeserializeOwned, Serialize};
use std::time::Instant;

use crate::encryption::{EncryptionError, Encrypter};
use crate::metrics::OperationMetrics;

/// Flatten a value into plaintext bytes
pub fn to_plaintext<T>(value: &T) -> Result<Vec<u8>, EncryptionError>
where
    T: Serialize + ?Sized,
{
    rmp_serde::to_vec_named(value)
        .map_err(|e| EncryptionError::SerializationFailed(e.to_string()))
}

/// Rebuild a value from decrypted plaintext bytes
pub fn from_plaintext<T>(plaintext: &[u8]) -> Result<T, EncryptionError>
where
    T: DeserializeOwned,
{
    rmp_serde::from_slice(plaintext)
        .map_err(|e| EncryptionError::DeserializationFailed(e.to_string()))
}

impl Encrypter {
    /// Serialize and encrypt a value
    ///
    /// # Example
    /// ```rust
    /// use encrypter_core::Encrypter;
    /// use std::collections::BTreeMap;
    ///
    /// let encrypter = Encrypter::with_single_key(&[0x01; 32]).unwrap();
    /// let mut session = BTreeMap::new();
    /// session.insert("user_id".to_string(), 42u64);
    ///
    /// let token = encrypter.encrypt(&session).unwrap();
    /// let restored: BTreeMap<String, u64> = encrypter.decrypt(&token).unwrap();
    /// assert_eq!(restored, session);
    /// ```
    pub fn encrypt<T>(&self, value: &T) -> Result<String, EncryptionError>
    where
        T: Serialize + ?Sized,
    {
        self.encrypt_with_metrics(value).map(|(token, _)| token)
    }

    /// Decrypt a token and deserialize the value it carries
    ///
    /// # Errors
    /// All errors of [`Encrypter::decrypt_bytes`], plus
    /// [`EncryptionError::DeserializationFailed`] if the plaintext is not a
    /// valid encoding of `T`.
    pub fn decrypt<T>(&self, token: &str) -> Result<T, EncryptionError>
    where
        T: DeserializeOwned,
    {
        self.decrypt_with_metrics(token).map(|(value, _)| value)
    }

    pub fn encrypt_with_metrics<T>(
        &self,
        value: &T,
    ) -> Result<(String, OperationMetrics), EncryptionError>
    where
        T: Serialize + ?Sized,
    {
        let start = Instant::now();
        let plaintext = to_plaintext(value)?;
        let serialization_micros = start.elapsed().as_micros() as u64;

        let (token, metrics) = self.encrypt_bytes_with_metrics(&plaintext)?;
        Ok((token, metrics.with_serialization(serialization_micros)))
    }

    pub fn decrypt_with_metrics<T>(
        &self,
        token: &str,
    ) -> Result<(T, OperationMetrics), EncryptionError>
    where
        T: DeserializeOwned,
    {
        let (plaintext, metrics) = self.decrypt_bytes_with_metrics(token)?;

        let start = Instant::now();
        let value = from_plaintext(&plaintext)?;
        let serialization_micros = start.elapsed().as_micros() as u64;

        Ok((value, metrics.with_serialization(serialization_micros)))
    }
}
