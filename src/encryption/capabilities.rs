//! Cryptographic capability probe
//!
//! Before an [`Encrypter`](super::Encrypter) accepts key material, the
//! primitives it depends on are checked once per process:
//!
//! - AES-256-CBC against the NIST SP 800-38A F.2.5 vector
//! - HMAC-SHA-256 against RFC 4231 test case 2
//! - the system CSPRNG produces bytes
//!
//! Any failure surfaces as [`EncryptionError::MissingCapability`]. The result
//! is cached, so the probe cost is paid by the first construction only.

use ring::rand::{SecureRandom, SystemRandom};
use std::sync::LazyLock;
use tracing::{debug, error};

use super::core::{cbc_decrypt, cbc_encrypt, compute_tag, EncryptionError};
use super::{BLOCK_LEN, IV_LEN};

// CPU feature detection
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use std::arch::is_x86_feature_detected;

// NIST SP 800-38A, F.2.5 CBC-AES256.Encrypt, block #1
const AES_KAT_KEY: [u8; 32] = [
    0x60, 0x3d, 0xeb, 0x10, 0x15, 0xca, 0x71, 0xbe, 0x2b, 0x73, 0xae, 0xf0, 0x85, 0x7d, 0x77, 0x81,
    0x1f, 0x35, 0x2c, 0x07, 0x3b, 0x61, 0x08, 0xd7, 0x2d, 0x98, 0x10, 0xa3, 0x09, 0x14, 0xdf, 0xf4,
];
const AES_KAT_IV: [u8; IV_LEN] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
];
const AES_KAT_PLAINTEXT: [u8; BLOCK_LEN] = [
    0x6b, 0xc1, 0xbe, 0xe2, 0x2e, 0x40, 0x9f, 0x96, 0xe9, 0x3d, 0x7e, 0x11, 0x73, 0x93, 0x17, 0x2a,
];
const AES_KAT_CIPHERTEXT: [u8; BLOCK_LEN] = [
    0xf5, 0x8c, 0x4c, 0x04, 0xd6, 0xe5, 0xf1, 0xba, 0x77, 0x9e, 0xab, 0xfb, 0x5f, 0x7b, 0xfb, 0xd6,
];

// RFC 4231, test case 2
const HMAC_KAT_KEY: &[u8] = b"Jefe";
const HMAC_KAT_DATA: &[u8] = b"what do ya want for nothing?";
const HMAC_KAT_TAG: [u8; 32] = [
    0x5b, 0xdc, 0xc1, 0x46, 0xbf, 0x60, 0x75, 0x4e, 0x6a, 0x04, 0x24, 0x26, 0x08, 0x95, 0x75, 0xc7,
    0x5a, 0x00, 0x3f, 0x08, 0x9d, 0x27, 0x39, 0x83, 0x9d, 0xec, 0x58, 0xb9, 0x64, 0xec, 0x38, 0x43,
];

static PROBE: LazyLock<Result<Capabilities, String>> = LazyLock::new(Capabilities::run_probe);

/// Primitives verified available in this process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    hardware_acceleration: bool,
}

impl Capabilities {
    /// Resolve the capability set, running the self test on first use
    pub fn probe() -> Result<Self, EncryptionError> {
        match &*PROBE {
            Ok(capabilities) => Ok(*capabilities),
            Err(reason) => Err(EncryptionError::MissingCapability(reason.clone())),
        }
    }

    /// Whether AES instructions were detected on this CPU.
    ///
    /// Informational only: the `aes` crate picks the fastest backend itself.
    pub fn hardware_acceleration(&self) -> bool {
        self.hardware_acceleration
    }

    fn run_probe() -> Result<Self, String> {
        let result = check_aes_cbc()
            .and_then(|_| check_hmac_sha256())
            .and_then(|_| check_random());

        match result {
            Ok(()) => {
                let capabilities = Self {
                    hardware_acceleration: detect_hardware_acceleration(),
                };
                debug!(
                    hardware_acceleration = capabilities.hardware_acceleration,
                    "cryptographic capability probe passed"
                );
                Ok(capabilities)
            }
            Err(reason) => {
                error!(%reason, "cryptographic capability probe failed");
                Err(reason)
            }
        }
    }
}

fn check_aes_cbc() -> Result<(), String> {
    let ciphertext = cbc_encrypt(&AES_KAT_KEY, &AES_KAT_IV, &AES_KAT_PLAINTEXT)
        .map_err(|e| format!("AES-256-CBC unavailable: {}", e))?;

    // One full block of input gains one full block of PKCS#7 padding
    if ciphertext.len() != 2 * BLOCK_LEN || ciphertext[..BLOCK_LEN] != AES_KAT_CIPHERTEXT {
        return Err("AES-256-CBC known-answer test failed".into());
    }

    let plaintext = cbc_decrypt(&AES_KAT_KEY, &AES_KAT_IV, &ciphertext)
        .map_err(|e| format!("AES-256-CBC decryption unavailable: {}", e))?;
    if plaintext != AES_KAT_PLAINTEXT {
        return Err("AES-256-CBC decryption known-answer test failed".into());
    }

    Ok(())
}

fn check_hmac_sha256() -> Result<(), String> {
    let (head, tail) = HMAC_KAT_DATA.split_at(8);
    let tag = compute_tag(HMAC_KAT_KEY, head, tail)
        .map_err(|e| format!("HMAC-SHA-256 unavailable: {}", e))?;
    if tag != HMAC_KAT_TAG {
        return Err("HMAC-SHA-256 known-answer test failed".into());
    }
    Ok(())
}

fn check_random() -> Result<(), String> {
    let mut buf = [0u8; IV_LEN];
    SystemRandom::new()
        .fill(&mut buf)
        .map_err(|_| "secure random source unavailable".to_string())
}

/// Detect AES hardware support
fn detect_hardware_acceleration() -> bool {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        is_x86_feature_detected!("aes")
    }

    #[cfg(target_arch = "aarch64")]
    {
        std::arch::is_aarch64_feature_detected!("aes")
    }

    // Other architectures use the software implementation
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
    {
        false
    }
}
