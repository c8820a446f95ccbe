//! Common test utilities and fixtures for the encrypter-core test suite.
//!
//! This module provides shared key material, payloads and helper functions used
//! across integration, concurrency and property-based tests.

pub mod fixtures;
