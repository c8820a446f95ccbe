//! Test fixtures and constants for encrypter-core tests.
//!
//! Key material, payloads and token helpers shared by the integration,
//! concurrency, large payload and property-based tests.

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine as _};

// ============================================================================
// Common Test Data
// ============================================================================

/// Empty data - minimal test case for boundary conditions
pub const EMPTY_DATA: &[u8] = b"";

/// Small data - typical short string for basic validation
pub const SMALL_DATA: &[u8] = b"hello world";

/// Exactly one AES block - padding must add a full extra block
pub const BLOCK_DATA: &[u8] = b"0123456789abcdef";

/// Unicode text - validates UTF-8 handling with emoji and international characters
pub const UNICODE_TEXT: &str = "Hello 世界 🚀 Rust";

// ============================================================================
// Key Material
// ============================================================================

/// `K1`: 32 bytes of 0x01
pub const KEY_ONES: &[u8; 32] = &[0x01; 32];

/// Cipher key of pair A
pub const CIPHER_KEY_A: &[u8; 32] = &[
    0x3e, 0x5a, 0x89, 0x7f, 0x2c, 0x1d, 0x4b, 0x91, 0xa2, 0x6f, 0x3c, 0xd4, 0x8e, 0x5b, 0x72, 0x19,
    0xf6, 0x4a, 0x21, 0x98, 0xc7, 0x65, 0x3d, 0xb0, 0x84, 0x59, 0x2e, 0xd1, 0xa6, 0x7b, 0x30, 0xe5,
];

/// Authentication key of pair A
pub const AUTH_KEY_A: &[u8; 32] = &[
    0x91, 0x0c, 0x5e, 0x27, 0xb8, 0x43, 0xf1, 0x6a, 0x0d, 0x9e, 0x72, 0x35, 0xc4, 0x18, 0xab, 0x6f,
    0x2e, 0x83, 0x57, 0xd9, 0x10, 0xfa, 0x64, 0xbc, 0x3b, 0x05, 0xe8, 0x7d, 0x49, 0xa2, 0xc6, 0x1f,
];

/// Cipher key of pair B
pub const CIPHER_KEY_B: &[u8; 32] = &[0x5c; 32];

/// Authentication key of pair B
pub const AUTH_KEY_B: &[u8; 32] = &[0x36; 32];

// ============================================================================
// Helper Functions
// ============================================================================

/// Decode a token into its raw bytes
pub fn token_bytes(token: &str) -> Vec<u8> {
    STANDARD.decode(token).expect("token must be valid base64")
}

/// Flip one bit of the decoded token at `position` and re-encode it
pub fn flip_byte(token: &str, position: usize) -> String {
    let mut bytes = token_bytes(token);
    bytes[position] ^= 0x01;
    STANDARD.encode(bytes)
}

/// Generate deterministic large data for testing (filled with pattern byte)
pub fn generate_large_data(size: usize, pattern: u8) -> Vec<u8> {
    vec![pattern; size]
}

/// Generate random-looking data from a seed.
///
/// Uses a simple PRNG (not cryptographically secure). Deterministic seed
/// ensures reproducibility.
pub fn generate_pseudorandom_data(size: usize, seed: u64) -> Vec<u8> {
    let mut rng = SimplePcg::new(seed);
    (0..size).map(|_| rng.next_byte()).collect()
}

// Simple PCG random number generator (deterministic, not crypto-secure)
struct SimplePcg {
    state: u64,
}

impl SimplePcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_byte(&mut self) -> u8 {
        // PCG algorithm: https://www.pcg-random.org/
        let old_state = self.state;
        self.state = old_state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xor_shifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        (xor_shifted.rotate_right(rot) & 0xff) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_constants() {
        assert_eq!(BLOCK_DATA.len(), 16);
        assert_eq!(KEY_ONES.len(), 32);
        assert_ne!(CIPHER_KEY_A, AUTH_KEY_A);
        assert_ne!(CIPHER_KEY_A, CIPHER_KEY_B);
    }

    #[test]
    fn test_flip_byte() {
        let token = STANDARD.encode([0u8; 48]);
        let flipped = token_bytes(&flip_byte(&token, 20));
        assert_eq!(flipped[20], 0x01);
        assert_eq!(flipped.iter().filter(|&&b| b != 0).count(), 1);
    }

    #[test]
    fn test_generate_pseudorandom_data() {
        let data1 = generate_pseudorandom_data(1000, 12345);
        let data2 = generate_pseudorandom_data(1000, 12345);
        let data3 = generate_pseudorandom_data(1000, 54321);

        assert_eq!(data1, data2);
        assert_ne!(data1, data3);
    }
}
