//! Per-call observability metrics
//!
//! Tracks timing and sizes of serialization, cipher and MAC work for a single
//! encrypt or decrypt call. Metrics are returned to the caller rather than
//! stored on the encrypter, which keeps no mutable state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Operation metrics for a single encrypt or decrypt call
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OperationMetrics {
    /// Value (de)serialization time in microseconds (0 if not performed)
    pub serialization_time_micros: u64,

    /// AES-256-CBC time in microseconds (None if the cipher was not reached)
    pub cipher_time_micros: Option<u64>,

    /// HMAC-SHA-256 compute or verify time in microseconds
    pub mac_time_micros: u64,

    /// Plaintext size in bytes (after serialization, before padding)
    pub plaintext_len: usize,

    /// Base64 token size in bytes
    pub token_len: usize,

    /// Whether AES hardware acceleration was detected
    pub hardware_accelerated: bool,
}

impl OperationMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        OperationMetrics {
            serialization_time_micros: 0,
            cipher_time_micros: None,
            mac_time_micros: 0,
            plaintext_len: 0,
            token_len: 0,
            hardware_accelerated: false,
        }
    }

    /// Set serialization metrics
    pub fn with_serialization(mut self, time_micros: u64) -> Self {
        self.serialization_time_micros = time_micros;
        self
    }

    /// Set cipher metrics
    pub fn with_cipher(mut self, time_micros: u64, hw_accel: bool) -> Self {
        self.cipher_time_micros = Some(time_micros);
        self.hardware_accelerated = hw_accel;
        self
    }

    /// Set MAC metrics
    pub fn with_mac(mut self, time_micros: u64) -> Self {
        self.mac_time_micros = time_micros;
        self
    }

    pub fn with_sizes(mut self, plaintext_len: usize, token_len: usize) -> Self {
        self.plaintext_len = plaintext_len;
        self.token_len = token_len;
        self
    }

    /// Token expansion over the plaintext (token_len / plaintext_len)
    pub fn expansion_ratio(&self) -> f64 {
        if self.plaintext_len == 0 {
            return self.token_len as f64;
        }
        self.token_len as f64 / self.plaintext_len as f64
    }

    /// Total operation time in microseconds
    pub fn total_time_micros(&self) -> u64 {
        let mut total = self.serialization_time_micros + self.mac_time_micros;
        if let Some(cipher_time) = self.cipher_time_micros {
            total += cipher_time;
        }
        total
    }
}

impl Default for OperationMetrics {
    fn default() -> Self {
        Self::new()
    }
}
