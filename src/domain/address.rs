//! Algorand address encoding and validation.
//!
//! An address is the base32 (no padding) encoding of a 32-byte public key
//! followed by the last four bytes of its SHA-512/256 digest.

use sha2::{Digest, Sha512_256};

use crate::constants::{ADDRESS_LENGTH, CHECKSUM_LENGTH, PUBLIC_KEY_LENGTH};

// ============================================================================
// Validator Trait
// ============================================================================

/// Decides whether a string is a well-formed address.
///
/// Closures `Fn(&str) -> bool` implement this too, which keeps tests free of
/// real key material.
pub trait AddressValidator {
    fn is_valid_address(&self, address: &str) -> bool;
}

impl<F> AddressValidator for F
where
    F: Fn(&str) -> bool,
{
    fn is_valid_address(&self, address: &str) -> bool {
        self(address)
    }
}

/// Validates addresses by length, alphabet and checksum.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlgorandAddressValidator;

impl AddressValidator for AlgorandAddressValidator {
    fn is_valid_address(&self, address: &str) -> bool {
        decode_address(address).is_some()
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Encode a 32-byte public key as an Algorand address.
#[must_use]
pub fn encode_address(public_key: &[u8; PUBLIC_KEY_LENGTH]) -> String {
    let mut addr_bytes = Vec::with_capacity(PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH);
    addr_bytes.extend_from_slice(public_key);
    addr_bytes.extend_from_slice(&checksum(public_key));

    data_encoding::BASE32_NOPAD.encode(&addr_bytes)
}

/// Decode an address back to its public key, verifying the checksum.
#[must_use]
pub fn decode_address(address: &str) -> Option<[u8; PUBLIC_KEY_LENGTH]> {
    if address.len() != ADDRESS_LENGTH {
        return None;
    }

    let bytes = data_encoding::BASE32_NOPAD.decode(address.as_bytes()).ok()?;
    if bytes.len() != PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH {
        return None;
    }

    let (key, sum) = bytes.split_at(PUBLIC_KEY_LENGTH);
    let key: [u8; PUBLIC_KEY_LENGTH] = key.try_into().ok()?;

    (checksum(&key) == sum).then_some(key)
}

fn checksum(public_key: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let hash = Sha512_256::digest(public_key);
    let mut sum = [0u8; CHECKSUM_LENGTH];
    sum.copy_from_slice(&hash[hash.len() - CHECKSUM_LENGTH..]);
    sum
}

// ============================================================================
// Tests
// ============================================================================
