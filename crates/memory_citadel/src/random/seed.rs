//! Seed derivation from room identifiers.
//!
//! The seed consumes all 16 bytes of the identifier, so two identifiers that
//! only differ in their trailing bytes still produce unrelated streams.
use uuid::Uuid;

use crate::error::{Error, Result};

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Derives the generator seed for an identifier.
#[inline]
pub fn seed_for_identifier(id: &Uuid) -> u64 {
    seed_from_bytes(id.as_bytes())
}

/// Derives the generator seed from the raw identifier bytes.
///
/// Both halves are read big-endian, so the result does not depend on the
/// host byte order.
pub fn seed_from_bytes(bytes: &[u8; 16]) -> u64 {
    let mut hi = [0u8; 8];
    let mut lo = [0u8; 8];
    hi.copy_from_slice(&bytes[..8]);
    lo.copy_from_slice(&bytes[8..]);
    let hi = u64::from_be_bytes(hi);
    let lo = u64::from_be_bytes(lo);
    mix_u64(hi ^ mix_u64(lo ^ GOLDEN_GAMMA))
}

/// Derives the generator seed from a byte slice that must be exactly 16 bytes long.
pub fn seed_from_slice(bytes: &[u8]) -> Result<u64> {
    let raw: &[u8; 16] = bytes.try_into().map_err(|_| {
        Error::InvalidInput(format!(
            "identifier must be 16 bytes, got {}",
            bytes.len()
        ))
    })?;
    Ok(seed_from_bytes(raw))
}

#[inline]
pub(crate) fn mix_u64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}
